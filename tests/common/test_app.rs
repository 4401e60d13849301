use bevy::prelude::*;
use driveable::{
    components::{ControlInput, Vehicle},
    plugins::{DriveableBundle, DriveablePlugin},
    resources::{DriveableConfig, Terrain},
};

// Builder for creating a test application with customizable configuration
#[derive(Default)]
pub struct TestAppBuilder {
    config: Option<DriveableConfig>,
    terrain: Option<Terrain>,
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: DriveableConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_terrain(mut self, terrain: Terrain) -> Self {
        self.terrain = Some(terrain);
        self
    }

    pub fn build(self) -> TestApp {
        let mut app = App::new();

        app.add_plugins(MinimalPlugins).add_plugins(DriveablePlugin::new(
            self.config.unwrap_or_default(),
            self.terrain.unwrap_or_default(),
        ));

        // Run an initial update to initialize everything
        app.update();

        TestApp { app }
    }
}

/// Main test application wrapper
pub struct TestApp {
    pub app: App,
}

impl TestApp {
    pub fn spawn(&mut self, bundle: DriveableBundle) -> Entity {
        self.app.world_mut().spawn(bundle).id()
    }

    /// Runs the fixed-timestep schedule directly, one call per simulation tick.
    pub fn run_ticks(&mut self, ticks: usize) {
        for _ in 0..ticks {
            self.app.world_mut().run_schedule(FixedUpdate);
        }
    }

    pub fn send<E: Event>(&mut self, event: E) {
        self.app.world_mut().send_event(event);
    }

    /// Takes every `E` raised since the last drain. Systems have already read them.
    pub fn drain_events<E: Event>(&mut self) -> Vec<E> {
        self.app.world_mut().resource_mut::<Events<E>>().drain().collect()
    }

    /// Input the vehicle on `entity` applies on the next tick.
    pub fn press(&mut self, entity: Entity, input: ControlInput) {
        if let Some(mut current) = self.app.world_mut().get_mut::<ControlInput>(entity) {
            *current = input;
        }
    }

    pub fn vehicle(&self, entity: Entity) -> Option<&Vehicle> {
        self.app.world().get::<Vehicle>(entity)
    }

    pub fn get_state<T: Resource>(&self) -> Option<&T> {
        self.app.world().get_resource::<T>()
    }

    pub fn query_single<T: Component>(&mut self) -> Option<&T> {
        let world = self.app.world_mut();
        let mut query = world.query::<&T>();
        query.get_single(world).ok()
    }
}
