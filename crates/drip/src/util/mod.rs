pub mod format;
pub mod io;
