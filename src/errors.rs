// ABOUTME: Re-exports the error taxonomy from gohealth-core for unified type identity
// ABOUTME: Server modules import AppError/AppResult from here
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GoHealth

pub use gohealth_core::errors::*;
