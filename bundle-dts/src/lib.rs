pub mod bundle_file;
pub mod emit;
pub mod engine;
pub mod err;
pub mod flatten;
pub mod fs;
pub mod graph;
pub mod plugin;
pub mod rename;
pub mod resolve;

pub use bundle_file::bundle_declaration_file;
pub use engine::BundleHandle;
pub use engine::BundleOptions;
pub use engine::DtsBundler;
pub use engine::Engine;
pub use engine::OutputOptions;
pub use engine::Warning;
pub use engine::WarningCode;
pub use err::BundleError;
pub use err::BundleFileError;
pub use err::BundleResult;
pub use fs::HostFs;
pub use fs::MemoryFs;
pub use fs::OsFs;
