use gl_triangles::{config::DemoConfig, demos::Triangles, logging, window};

fn main() -> anyhow::Result<()> {
    logging::init_logging(logging::LoggingConfig::default());
    let config = DemoConfig {
        width: 512,
        height: 512,
        ..DemoConfig::titled("triangles")
    }
    .with_env_overrides()?;
    window::run::<Triangles>(config)
}
