mod autopilot;
mod constants;
mod output;

use anyhow::{anyhow, bail, Context, Result};
use autopilot::choose_action;
use battle::loader_schema::AbilityCatalog;
use battle::{Area, Battle, BattleOutcome, BattleReward, BattleState, Combatant, Dice};
use board::{PlayerColor, Track};
use clap::{Parser, Subcommand, ValueEnum};
use constants::{
    ABILITIES_FILE, APP_NAME, DEFAULT_ABILITIES_TOML, DEFAULT_ENEMIES_TOML, DEFAULT_GAME_TOML,
    DEFAULT_LOG_FILTER, ENEMIES_FILE, GAME_FILE, MAX_ACTIONS,
};
use game_core::{area_for_path_index, GameData, GameSession, Landing, Phase};
use output::Printer;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = APP_NAME)]
#[command(about = "Headless driver for the Path Battler rules engine")]
struct Cli {
    /// RNG seed for reproducible runs
    #[arg(long, global = true)]
    seed: Option<u64>,
    /// Print events as JSON lines
    #[arg(long, global = true)]
    json: bool,
    /// Directory holding abilities.toml, enemies.toml and game.toml
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Play a whole game with the built-in autopilot
    Play,
    /// Fight a single battle against an enemy or boss template
    Duel {
        /// Enemy or boss template name
        #[arg(long)]
        enemy: String,
        /// Area of the battle
        #[arg(long, value_enum, default_value_t = AreaArg::Fire)]
        area: AreaArg,
    },
    /// Print the track of a player colour
    Track {
        #[arg(long, value_enum, default_value_t = ColorArg::Yellow)]
        color: ColorArg,
    },
}

#[derive(Copy, Clone, ValueEnum)]
enum AreaArg {
    Fire,
    Earth,
    Lightning,
    Snow,
}

impl From<AreaArg> for Area {
    fn from(arg: AreaArg) -> Self {
        match arg {
            AreaArg::Fire => Area::Fire,
            AreaArg::Earth => Area::Earth,
            AreaArg::Lightning => Area::Lightning,
            AreaArg::Snow => Area::Snow,
        }
    }
}

#[derive(Copy, Clone, ValueEnum)]
enum ColorArg {
    Red,
    Green,
    Blue,
    Yellow,
}

impl From<ColorArg> for PlayerColor {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Red => PlayerColor::Red,
            ColorArg::Green => PlayerColor::Green,
            ColorArg::Blue => PlayerColor::Blue,
            ColorArg::Yellow => PlayerColor::Yellow,
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let printer = Printer::new(cli.json);
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    match cli.cmd {
        Cmd::Play => {
            let data = load_data(cli.data_dir.as_deref())?;
            play(data, &mut rng, &printer)
        }
        Cmd::Duel { enemy, area } => {
            let data = load_data(cli.data_dir.as_deref())?;
            duel(&data, &enemy, area.into(), &mut rng, &printer)
        }
        Cmd::Track { color } => print_track(color.into(), &printer),
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

/// 讀取資料；未指定目錄時使用內建資料
fn load_data(data_dir: Option<&Path>) -> Result<GameData> {
    let Some(dir) = data_dir else {
        return GameData::from_toml(DEFAULT_ABILITIES_TOML, DEFAULT_ENEMIES_TOML, DEFAULT_GAME_TOML)
            .context("built-in game data is invalid");
    };

    let read = |file: &str| {
        let path = dir.join(file);
        std::fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))
    };
    let abilities = read(ABILITIES_FILE)?;
    let enemies = read(ENEMIES_FILE)?;
    let game = read(GAME_FILE)?;
    info!(dir = %dir.display(), "loading game data");
    GameData::from_toml(&abilities, &enemies, &game)
        .with_context(|| format!("invalid game data in {}", dir.display()))
}

fn play(data: GameData, rng: &mut StdRng, printer: &Printer) -> Result<()> {
    let mut session = GameSession::new(data, rng)?;

    for _ in 0..MAX_ACTIONS {
        match session.phase() {
            Phase::GameOver => {
                return printer.record("game_over", &session.position(), || {
                    format!("Game over at cell {}.", session.position())
                });
            }
            Phase::Finished => {
                return printer.record("finished", &session.position(), || {
                    "You reached the end of the path!".to_string()
                });
            }
            Phase::AwaitingRoll => {
                let outcome = session.roll_and_move(rng)?;
                printer.record("move", &outcome, || {
                    format!(
                        "Rolled {}: moved {} -> {}",
                        outcome.steps, outcome.from, outcome.to
                    )
                })?;
                match &outcome.landing {
                    Landing::Battle { events, .. } => printer.events(events)?,
                    Landing::Buff { buff, amount } => {
                        printer.text(|| format!("  Ally cell: {buff} +{amount}"));
                    }
                    Landing::Empty => {}
                }
            }
            Phase::InBattle(battle) => match battle.state() {
                BattleState::PlayerTurn => {
                    let ability = choose_action(battle, &session.data().abilities)
                        .ok_or_else(|| anyhow!("player has no usable ability"))?;
                    let events = session.player_action(&ability, rng)?;
                    printer.events(&events)?;
                }
                BattleState::EnemyTurn => {
                    let events = session.enemy_turn(rng)?;
                    printer.events(&events)?;
                }
                _ => {
                    let result = session.conclude_battle(rng)?;
                    let player = session.player();
                    printer.record("battle_result", &result.outcome, || {
                        format!(
                            "Battle over: {:?} ({} / {} HP, attack {}, defense {})",
                            result.outcome,
                            player.current_health,
                            player.max_health,
                            player.attack_power(),
                            player.defense()
                        )
                    })?;
                }
            },
        }
    }
    bail!("game did not finish within {MAX_ACTIONS} actions")
}

fn duel(
    data: &GameData,
    enemy_name: &str,
    area: Area,
    rng: &mut StdRng,
    printer: &Printer,
) -> Result<()> {
    let player = data.config.player.build();
    let area_ability = data.config.area_abilities.get(area).clone();

    let (enemy, reward) = if let Ok(boss) = data.roster.boss(enemy_name) {
        (
            Combatant::boss(boss, area_ability.clone()),
            BattleReward::skill(area_ability),
        )
    } else {
        let template = data
            .roster
            .enemies
            .iter()
            .find(|e| e.name == enemy_name)
            .ok_or_else(|| anyhow!("unknown enemy `{enemy_name}`"))?;
        let potion = data.config.spawner.potion_rewards.first().cloned();
        (
            Combatant::area_enemy(template, area_ability),
            BattleReward {
                skill: None,
                potion,
            },
        )
    };

    let mut battle = Battle::new(player, enemy, area, reward);
    printer.events(&battle.begin(&data.abilities)?)?;
    run_battle(&mut battle, &data.abilities, rng, printer)?;

    let result = battle.finish()?;
    printer.record("battle_result", &result.outcome, || match result.outcome {
        BattleOutcome::Victory => format!(
            "Victory with {} / {} HP left.",
            result.player.current_health, result.player.max_health
        ),
        BattleOutcome::Defeat => "Defeat.".to_string(),
    })
}

fn run_battle(
    battle: &mut Battle,
    catalog: &AbilityCatalog,
    dice: &mut impl Dice,
    printer: &Printer,
) -> Result<()> {
    for _ in 0..MAX_ACTIONS {
        let events = match battle.state() {
            BattleState::PlayerTurn => {
                let ability = choose_action(battle, catalog)
                    .ok_or_else(|| anyhow!("player has no usable ability"))?;
                battle.player_action(&ability, catalog, dice)?
            }
            BattleState::EnemyTurn => battle.enemy_turn(catalog, dice)?,
            _ => return Ok(()),
        };
        printer.events(&events)?;
    }
    bail!("battle did not finish within {MAX_ACTIONS} actions")
}

fn print_track(color: PlayerColor, printer: &Printer) -> Result<()> {
    let track = Track::new(color)?;
    for (index, pos) in track.cells().iter().enumerate() {
        let area = area_for_path_index(index);
        printer.record("cell", &(index, pos, area), || {
            format!("{index:>2}  ({:>2}, {:>2})  {area}", pos.x, pos.y)
        })?;
    }
    Ok(())
}
