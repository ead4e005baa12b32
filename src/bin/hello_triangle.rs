use gl_triangles::{config::DemoConfig, demos::HelloTriangle, logging, window};

fn main() -> anyhow::Result<()> {
    logging::init_logging(logging::LoggingConfig::default());
    let config = DemoConfig::titled("Hello Triangle").with_env_overrides()?;
    window::run::<HelloTriangle>(config)
}
