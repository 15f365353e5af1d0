mod bot_frontend;
mod config;

use clap::Parser;
use chrono::Local;
use snake_engine::config::Validate;
use snake_engine::game::{BotKind, Difficulty, SessionRng};
use snake_engine::high_score::FileHighScoreStore;
use snake_engine::session::{ControlCommand, GameSession, TickScheduler};
use snake_engine::{log, logger};
use tokio::sync::mpsc;

use bot_frontend::BotFrontend;
use config::{DEFAULT_CONFIG_FILE, RunnerConfig, get_config_manager};

#[derive(Parser)]
#[command(name = "snake_runner")]
struct Args {
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: String,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    difficulty: Option<Difficulty>,

    #[arg(long)]
    bot: Option<BotKind>,

    #[arg(long)]
    max_ticks: Option<u64>,

    #[arg(long)]
    write_default_config: bool,

    #[arg(long)]
    use_log_prefix: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Runner".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config_manager = get_config_manager(&args.config);
    if args.write_default_config {
        config_manager.set_config(&RunnerConfig::default())?;
        log!("Default config written to {}", args.config);
        return Ok(());
    }

    let mut config = config_manager.get_config()?;
    if let Some(difficulty) = args.difficulty {
        config.game.difficulty = difficulty;
    }
    if let Some(bot) = args.bot {
        config.bot = bot;
    }
    config.validate()?;

    let rng = match args.seed {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };
    let bot_rng = SessionRng::new(rng.seed().wrapping_add(1));
    log!("Seed: {}, bot: {:?}", rng.seed(), config.bot);

    let store = FileHighScoreStore::new(&config.high_score_file);
    let mut session = GameSession::new(config.game.clone(), rng, store);
    let mut frontend = BotFrontend::new(config.bot, bot_rng, config.hud_every_ticks, config.event_log_size);

    let (command_tx, command_rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log!("Interrupted, stopping match...");
            let _ = command_tx.send(ControlCommand::Stop);
        }
    });

    session.start()?;
    let started_at = Local::now();
    let summary = TickScheduler::new()
        .with_max_ticks(args.max_ticks)
        .run(&mut session, &mut frontend, command_rx)
        .await;
    let wall_time = Local::now() - started_at;

    for event in frontend.recent_events() {
        log!("Recent: {}", event);
    }
    log!(
        "Finished: {:?}. Score {}, high score {}, level {}, length {}, {} ticks ({:.1}s simulated, {}ms wall), {} achievements",
        summary.status,
        summary.final_score,
        summary.high_score,
        summary.level,
        summary.length,
        summary.ticks,
        summary.elapsed.as_secs_f32(),
        wall_time.num_milliseconds(),
        summary.achievements
    );

    Ok(())
}
