use anyhow::Context;
use spincube_engine::device::GpuInit;
use spincube_engine::logging::{init_logging, LoggingConfig};
use spincube_engine::window::{LogicalSize, Runtime, RuntimeConfig};
use spincube_game::{GameConfig, SpincubeApp};

fn main() -> anyhow::Result<()> {
    let path = GameConfig::path_from_args(std::env::args());
    let config = GameConfig::load(&path).with_context(|| format!("loading {}", path.display()))?;

    init_logging(LoggingConfig { env_filter: config.log_filter.clone(), ..LoggingConfig::default() });
    log::info!("spincube starting (config: {})", path.display());

    let runtime = RuntimeConfig {
        title: config.window.title.clone(),
        initial_size: LogicalSize::new(config.window.width, config.window.height),
    };
    Runtime::run(runtime, GpuInit::default(), SpincubeApp::new(config))
}
