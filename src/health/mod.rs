pub mod advice;
pub mod alerts;
pub mod scorer;
