pub mod cv;
pub mod dossier;
