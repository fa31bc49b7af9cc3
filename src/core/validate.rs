// Input path validation run before the pipeline touches file contents.
// Metadata lookups follow symlinks; a link to a regular file is accepted.
use crate::core::error::{Error, ErrorKind};
use crate::pipeline::Stage;
use std::fs;
use std::path::Path;

pub fn validate_input_path(path: &Path) -> Result<(), Error> {
    let metadata = fs::metadata(path).map_err(|err| {
        Error::new(ErrorKind::NotFound)
            .with_path(path)
            .with_stage(Stage::ValidatingInput)
            .with_source(err)
    })?;
    if !metadata.is_file() {
        return Err(Error::new(ErrorKind::NotAFile)
            .with_path(path)
            .with_stage(Stage::ValidatingInput));
    }
    Ok(())
}
