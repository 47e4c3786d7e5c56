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

use std::env::current_dir;
use std::path::PathBuf;
use std::time::Duration;

use tokio::net::TcpStream;
use tokio::time::sleep;

use crate::error::Fallible;
use crate::error::fail;

// max-age is one week in seconds.
pub const CACHE_CONTROL_IMMUTABLE: &str = "public, max-age=604800, immutable";

/// Resolves the data directory: the given path, or the current working
/// directory when none was given. The directory must already exist.
pub fn data_dir(directory: Option<String>) -> Fallible<PathBuf> {
    let path = match directory {
        Some(dir) => PathBuf::from(dir),
        None => current_dir()?,
    };
    if !path.is_dir() {
        return fail("directory does not exist.");
    }
    Ok(path)
}

/// Polls until the server accepts TCP connections, for ten seconds at most.
pub async fn wait_for_server(host: &str, port: u16) -> Fallible<()> {
    for _ in 0..2000 {
        if TcpStream::connect((host, port)).await.is_ok() {
            return Ok(());
        }
        sleep(Duration::from_millis(5)).await;
    }
    fail(format!("server at {host}:{port} did not come up"))
}
