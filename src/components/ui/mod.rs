mod alert;
mod button;
mod modal;
mod spinner;
mod status_badge;

pub(crate) use alert::{Alert, AlertKind};
pub(crate) use button::Button;
pub(crate) use modal::Modal;
pub(crate) use spinner::Spinner;
pub(crate) use status_badge::StatusBadge;
