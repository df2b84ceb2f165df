pub mod job_loader;

pub use job_loader::{load_all_job_files, load_toml_to_job, GenerationJob};
