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

use crate::config::modes::ModeTable;
use crate::types::mode_name::ModeName;

/// Picks the display mode for a card with the given progress and review
/// count.
///
/// The first band containing `progress` wins. If that band alternates, the
/// parity of `review_count` decides whether its alternate is shown instead.
/// Progress outside every band gets the terminal (highest) band.
pub fn select_display_mode(modes: &ModeTable, progress: u8, review_count: u32) -> ModeName {
    let band = match modes.band_for(progress) {
        Some(band) => band,
        None => {
            log::warn!("No display mode covers progress {progress}, using the terminal mode.");
            modes.terminal()
        }
    };
    band.alternate_for(review_count).unwrap_or(band.name)
}
