// Copyright (c) 2019-present Dmitry Stepanov and Fyrox Engine contributors.
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

//! A minimal log sink for the non-fatal conditions this crate reports on its
//! own (resolution gaps, schema warnings) — there is no editor panel here to
//! mirror messages into, so this just wraps `stdout`/`stderr`.

use std::fmt::Display;

/// Severity of a logged message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Warning,
    Error,
}

/// Stateless log sink. All methods are associated functions; there is no
/// instance to construct or configure.
pub struct Log;

impl Log {
    pub fn info(message: impl Display) {
        Self::write(MessageKind::Info, message);
    }

    pub fn warn(message: impl Display) {
        Self::write(MessageKind::Warning, message);
    }

    pub fn err(message: impl Display) {
        Self::write(MessageKind::Error, message);
    }

    fn write(kind: MessageKind, message: impl Display) {
        match kind {
            MessageKind::Info => println!("[INFO]: {message}"),
            MessageKind::Warning => eprintln!("[WARNING]: {message}"),
            MessageKind::Error => eprintln!("[ERROR]: {message}"),
        }
    }
}
