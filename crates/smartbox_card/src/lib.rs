pub mod api;
pub mod card;
pub mod command;
pub mod config;
pub mod device_action;
pub mod host;
pub mod icons;
pub mod registry;
pub mod remote;
pub mod resources;
pub mod view;

pub use card::CardConfig;
pub use card::CardPhase;
pub use card::RemoteCard;
pub use command::RemoteCommand;
pub use config::Config;
pub use config::LogLevel;
pub use host::EntityState;
pub use host::Hass;
pub use host::ServiceCall;
pub use host::ServiceDispatcher;
pub use host::StateProvider;
pub use host::StateSnapshot;
pub use registry::CardRegistry;
pub use registry::Registration;
pub use remote::RemoteHost;
pub use view::View;
