pub mod classroom;
pub mod config;
pub mod error;
pub mod session;
pub mod state;
pub mod view;

// Re-export main types for convenience
pub use classroom::{Announcement, Doubt, DoubtBoard};
pub use config::{Brand, Config, DashboardStats, Features, SupportContacts};
pub use error::{SessionError, ValidationError};
pub use session::{Identity, Role, Session};
pub use state::{AppState, PendingLogin};
pub use view::View;
