use gl_triangles::{config::DemoConfig, demos::Circle, logging, window};

fn main() -> anyhow::Result<()> {
    logging::init_logging(logging::LoggingConfig::default());
    let config = DemoConfig::titled("circle").with_env_overrides()?;
    window::run::<Circle>(config)
}
