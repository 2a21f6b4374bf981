// Copyright 2018 Chris Pearce
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A threshold outside the domain of the metric it applies to.
    #[error("{name} threshold {value} is outside its valid range")]
    InvalidThreshold { name: &'static str, value: f64 },

    /// The frequent itemset collection is not downward closed. This is a
    /// mining bug, never a user input problem.
    #[error("internal consistency failure: {0}")]
    InternalConsistency(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("input has no column named '{0}'")]
    MissingColumn(String),

    #[error("malformed row at line {line}: {reason}")]
    MalformedRow { line: usize, reason: String },
}

impl Error {
    pub fn is_internal(&self) -> bool {
        matches!(self, Error::InternalConsistency(_))
    }
}
