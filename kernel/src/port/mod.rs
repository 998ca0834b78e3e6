//! Advisory collaborators. Callers log their failures and never propagate them.

pub mod calendar;
pub mod notification;
