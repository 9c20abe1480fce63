/// Tilawa Player - verse repeat sessions in the terminal
use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tilawa_cli::{
    config::CliConfig,
    session::{self, PlayRequest},
};
use tilawa_core::{audio_url_with_base, verse_count, VerseKey};
use tilawa_playback::{RepeatDraft, RepeatMode};
use tilawa_verses::VerseClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "tilawa")]
#[command(about = "Recite and repeat Quran verses", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "TILAWA_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a surah with the configured repeat options
    Play {
        /// Surah number
        #[arg(short, long)]
        surah: u32,

        /// Override the number of verses in the surah
        #[arg(long)]
        verses: Option<u32>,

        /// Verse to start from
        #[arg(long, default_value_t = 1)]
        start_verse: u32,

        /// Repeat mode
        #[arg(short, long, value_enum)]
        mode: Option<ModeArg>,

        /// First verse of the repeated range
        #[arg(long)]
        start: Option<f64>,

        /// Last verse of the repeated range
        #[arg(long)]
        end: Option<f64>,

        /// Times the repeat unit is played
        #[arg(long)]
        play_count: Option<f64>,

        /// Times each verse is played per cycle
        #[arg(long)]
        repeat_each: Option<f64>,

        /// Pause before each new cycle, in milliseconds
        #[arg(long)]
        delay_ms: Option<f64>,

        /// Do not call the verse API
        #[arg(long)]
        offline: bool,
    },
    /// Fetch and print a verse
    Verse {
        /// Verse key, e.g. 2:255
        key: String,
    },
    /// Print the recitation URL of a verse
    Url {
        /// Verse key, e.g. 2:255
        key: String,

        /// Reciter path (defaults to the configured reciter)
        #[arg(short, long)]
        reciter: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Off,
    Single,
    Range,
    Surah,
}

impl From<ModeArg> for RepeatMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Off => RepeatMode::Off,
            ModeArg::Single => RepeatMode::Single,
            ModeArg::Range => RepeatMode::Range,
            ModeArg::Surah => RepeatMode::Surah,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "tilawa_cli=info,tilawa_playback=info,tilawa_verses=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut config = CliConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Play {
            surah,
            verses,
            start_verse,
            mode,
            start,
            end,
            play_count,
            repeat_each,
            delay_ms,
            offline,
        } => {
            config.verses.offline |= offline;
            config.validate()?;

            let defaults = config.repeat.draft();
            let repeat = RepeatDraft {
                mode: mode.map_or(defaults.mode, RepeatMode::from),
                start: start.unwrap_or(defaults.start),
                end: end.unwrap_or(defaults.end),
                play_count: play_count.unwrap_or(defaults.play_count),
                repeat_each: repeat_each.unwrap_or(defaults.repeat_each),
                delay_ms: delay_ms.unwrap_or(defaults.delay_ms),
            };

            let verse_count = match verses {
                Some(count) => count,
                None => verse_count(surah)
                    .with_context(|| format!("Surah {} does not exist", surah))?,
            };

            let request = PlayRequest {
                surah,
                verse_count,
                start_verse,
                repeat,
            };
            play(&config, request).await?;
        }
        Commands::Verse { key } => {
            config.validate()?;
            print_verse(&config, &key).await?;
        }
        Commands::Url { key, reciter } => {
            let reciter = reciter.unwrap_or_else(|| config.playback.reciter.clone());
            let url = audio_url_with_base(&config.playback.cdn_base, &key, &reciter)?;
            println!("{}", url);
        }
    }

    Ok(())
}

async fn play(config: &CliConfig, request: PlayRequest) -> anyhow::Result<()> {
    let surah = request.surah;
    let summary = session::run(config, request)
        .await
        .with_context(|| format!("Session for surah {} failed", surah))?;

    match summary.finish_reason {
        Some(reason) => println!(
            "Finished after {} recitations ({:?})",
            summary.verses_played, reason
        ),
        None => println!("Stopped after {} recitations", summary.verses_played),
    }
    Ok(())
}

async fn print_verse(config: &CliConfig, key: &str) -> anyhow::Result<()> {
    let key: VerseKey = key.parse()?;
    let client = VerseClient::new(&config.verses.api_base)?;
    let verse = client.fetch_verse(key, &config.verses.language).await?;

    println!("{} (#{})", verse.verse_key, verse.id);
    println!("{}", verse.text);
    if let Some(url) = verse.audio_url {
        println!("Audio: {}", url);
    }
    Ok(())
}
