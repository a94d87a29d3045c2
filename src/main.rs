mod scene;    // brings `scene.rs` in as `crate::scene`
mod script;   // brings `script.rs` in as `crate::script`
mod settings; // brings `settings.rs` in as `crate::settings`

use scene::{Entity, EntityHandle};
use script::ScriptRunner;
use settings::{DEFAULT_CONFIG_PATH, load_settings};

use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    info!("Gridlink started.");

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let settings = load_settings(&path)?;

    let space = settings.grid.space()?;
    info!(%space, "Grid space ready");

    let entity = EntityHandle::new(Entity::new(
        settings.entity.name.clone(),
        settings.entity.position(),
    ));
    info!(
        name = %settings.entity.name,
        position = %settings.entity.position(),
        "Spawned scene entity"
    );

    let mut runner = ScriptRunner::new(space, entity, settings.snap_mode, settings.goal())?;
    let report = runner.run(&settings.script);

    let coord = runner.coordinate();
    let entity = runner.entity().snapshot();
    info!(
        applied = report.applied,
        rejected = report.rejected,
        cell = %coord.point(),
        attached = coord.is_attached(),
        position = %entity.position,
        writes = entity.writes,
        "Script finished"
    );

    Ok(())
}
