use anyhow::Context;
use phonebook::contacts::{JsonFileStore, MemoryStore};
use phonebook::logging::{self, Logger};
use phonebook::{error, AppConfig, CliOptions, StoreLocation, TuiApplication};

fn main() -> anyhow::Result<()> {
    error::setup_panic_handler();

    let options = CliOptions::parse(std::env::args().skip(1)).context("invalid arguments")?;
    if options.show_help {
        println!("{}", CliOptions::USAGE);
        return Ok(());
    }

    let config = AppConfig::from_cli(&options).context("failed to load configuration")?;
    init_logging(&config)?;

    let location = config
        .store_location()
        .context("cannot determine the data directory; pass --store <path>")?;
    match location {
        StoreLocation::Memory => {
            log::info!("using in-memory contact store");
            run(MemoryStore::new(), &config)
        }
        StoreLocation::File(path) => {
            let store = JsonFileStore::open(&path)
                .with_context(|| format!("failed to open contact store {}", path.display()))?;
            run(store, &config)
        }
    }
}

fn run<S: phonebook::contacts::ContactApi>(store: S, config: &AppConfig) -> anyhow::Result<()> {
    let mut app = TuiApplication::new(store, config.caret_settle, config.poll_interval());
    app.run().context("terminal session failed")
}

fn init_logging(config: &AppConfig) -> anyhow::Result<()> {
    // TUI 実行中は標準エラー出力へ書かない
    let mut logger = Logger::new(config.log_level).without_stderr();
    if let Some(path) = config.resolve_log_path() {
        logger = logger.with_file_output(path);
    }
    logging::init(logger).context("failed to install logger")
}
