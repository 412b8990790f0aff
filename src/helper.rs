// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use chrono::NaiveDateTime;
use ripasso_core::Date;
use ripasso_core::Timestamp;
use tempfile::TempDir;
use tempfile::tempdir;

use crate::error::Fallible;
use crate::library::Library;

/// Opens a library in a fresh temporary directory. The directory is removed
/// when the returned `TempDir` is dropped.
pub fn create_tmp_library() -> Fallible<(TempDir, Library)> {
    let dir = tempdir()?;
    let library = Library::open(Some(dir.path().display().to_string()))?;
    Ok((dir, library))
}

pub fn ts(s: &str) -> Timestamp {
    Timestamp::new(NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.3f").unwrap())
}

pub fn day(s: &str) -> Date {
    Date::try_from(s.to_string()).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tmp_library() -> Fallible<()> {
        let (dir, library) = create_tmp_library()?;
        assert_eq!(library.directory, dir.path().canonicalize()?);
        Ok(())
    }
}
