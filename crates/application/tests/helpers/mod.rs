
pub use mock_directory::*;
