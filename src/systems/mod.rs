mod camera;
mod controls;
pub mod dynamics;
mod network;
mod requests;
pub mod suspension;
mod tick;

pub use camera::chase_camera_system;
pub use controls::{apply_control_input, has_working_thrust};
pub use dynamics::{dynamics_step, DynamicsReport};
pub use network::{inbound_snapshot_system, ReconcileOutcome};
pub use requests::vehicle_request_system;
pub use suspension::{move_support_point, solve_suspension, spring_correction, SpringCorrection};
pub use tick::{despawn_dead_vehicles_system, tick_vehicle, vehicle_tick_system, TickContext};
