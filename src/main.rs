// Distributed under the GNU Affero General Public License v3.0 or later.
// See accompanying file LICENSE or https://www.gnu.org/licenses/agpl-3.0.html for details.

mod demo;
mod settings;

use log::LevelFilter;
use settings::Settings;

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

fn setup_logging() {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .format_timestamp_millis()
        .parse_default_env()
        .init();
}

fn main() {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    setup_logging();
    let settings = Settings::load_user_settings();

    match demo::run(&settings) {
        Ok(summary) => log::info!(
            "Demo finished after {} ticks: player at {:?}, grounded={}, {} collision events",
            summary.ticks,
            summary.player_position,
            summary.grounded,
            summary.events
        ),
        Err(e) => {
            log::error!("Demo failed: {}", e);
            std::process::exit(1);
        }
    }
}
