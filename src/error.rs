// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Error types for bloomsketch operations

use std::fmt;

/// ErrorKind is all kinds of Error of bloomsketch.
///
/// Every kind is a programmer-contract violation detected synchronously at
/// the offending call, never a transient condition worth retrying.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Construction was given neither a valid explicit `(num_bits,
    /// num_hashes)` pair nor a valid `(capacity, error_rate)` pair.
    InvalidParameters,
    /// A snapshot being restored is malformed.
    InvalidSnapshot,
    /// A set operation was invoked on filters whose dimensions differ.
    IncompatibleFilters,
}

impl ErrorKind {
    /// Convert this error kind instance into static str.
    pub const fn into_static(self) -> &'static str {
        match self {
            ErrorKind::InvalidParameters => "InvalidParameters",
            ErrorKind::InvalidSnapshot => "InvalidSnapshot",
            ErrorKind::IncompatibleFilters => "IncompatibleFilters",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.into_static())
    }
}

/// Error is the error struct returned by all bloomsketch functions.
///
/// # Examples
///
/// ```
/// # use bloomsketch::error::Error;
/// # use bloomsketch::error::ErrorKind;
/// let err = Error::new(ErrorKind::InvalidParameters, "bad input");
/// assert_eq!(err.kind(), ErrorKind::InvalidParameters);
/// assert_eq!(err.message(), "bad input");
/// ```
pub struct Error {
    kind: ErrorKind,
    message: String,
    context: Vec<(&'static str, String)>,
}

impl Error {
    /// Create a new Error with error kind and message.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            context: vec![],
        }
    }

    /// Add more context in error.
    pub fn with_context(mut self, key: &'static str, value: impl ToString) -> Self {
        self.context.push((key, value.to_string()));
        self
    }

    /// Return error's kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Return error's message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

// Convenient constructors used within the bloomsketch crate.
impl Error {
    pub(crate) fn invalid_parameters(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidParameters, msg)
    }

    pub(crate) fn invalid_snapshot(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidSnapshot, msg)
    }

    pub(crate) fn incompatible_filters(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::IncompatibleFilters, msg)
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // If alternate has been specified, we will print like Debug.
        if f.alternate() {
            let mut de = f.debug_struct("Error");
            de.field("kind", &self.kind);
            de.field("message", &self.message);
            de.field("context", &self.context);
            return de.finish();
        }

        write!(f, "{}", self.kind)?;
        if !self.message.is_empty() {
            write!(f, " => {}", self.message)?;
        }
        writeln!(f)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            writeln!(f, "Context:")?;
            for (k, v) in self.context.iter() {
                writeln!(f, "   {k}: {v}")?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;

        if !self.context.is_empty() {
            write!(f, ", context: {{ ")?;
            for (i, (k, v)) in self.context.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}: {}", k, v)?;
            }
            write!(f, " }}")?;
        }

        if !self.message.is_empty() {
            write!(f, " => {}", self.message)?;
        }

        Ok(())
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;

    use super::*;

    #[test]
    fn test_format_consistency() {
        let err = Error::new(ErrorKind::InvalidParameters, "something went wrong");
        assert_snapshot!(err, @"InvalidParameters => something went wrong",);
    }

    #[test]
    fn test_format_with_multiple_contexts() {
        let err = Error::new(ErrorKind::InvalidSnapshot, "restore failed")
            .with_context("bitCount", 0)
            .with_context("hashCount", 7);
        assert_snapshot!(err, @"InvalidSnapshot, context: { bitCount: 0, hashCount: 7 } => restore failed");
    }
}
