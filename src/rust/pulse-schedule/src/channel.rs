// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

/// Logical target of schedule instructions.
///
/// A virtual channel does not know about hardware; the mapping to a physical
/// output is supplied to the compiler separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VirtualChannel {
    Drive(u32),
    Control(u32),
    Measure(u32),
}

impl VirtualChannel {
    pub fn index(&self) -> u32 {
        match self {
            VirtualChannel::Drive(idx)
            | VirtualChannel::Control(idx)
            | VirtualChannel::Measure(idx) => *idx,
        }
    }

    fn prefix(&self) -> &'static str {
        match self {
            VirtualChannel::Drive(_) => "d",
            VirtualChannel::Control(_) => "u",
            VirtualChannel::Measure(_) => "m",
        }
    }
}

impl fmt::Display for VirtualChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.prefix(), self.index())
    }
}
