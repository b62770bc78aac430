//! Prefetcher statistics collection and reporting.
//!
//! Tracks diagnostic counters for one prefetcher instance. It provides:
//! 1. **Lookups:** Misses observed, index hits, cold misses, and stale matches.
//! 2. **Replay:** Replays started, prefetches issued, and replays cut short by
//!    log occupancy.
//! 3. **Reporting:** A sectioned end-of-run dump and a one-line `Display` summary.

use std::fmt;

/// Diagnostic counters for one prefetcher instance.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TifsStats {
    /// Instruction-fetch misses observed.
    pub misses: u64,
    /// Cache hits passed to the prefetcher and ignored.
    pub hits_ignored: u64,
    /// Misses whose tag was already in the index (valid or stale).
    pub index_hits: u64,
    /// Misses whose tag was not in the index.
    pub index_misses: u64,
    /// Index hits rejected because the log slot had been overwritten.
    pub stale_matches: u64,
    /// Misses that triggered a replay.
    pub replays: u64,
    /// Total prefetch requests issued.
    pub prefetches_issued: u64,
    /// Replays that issued fewer than `prefetch_depth` requests.
    pub truncated_replays: u64,
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"lookup"`, `"replay"`.
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["lookup", "replay"];

/// Returns `num / den` as a percentage, or 0 when `den` is zero.
fn percent(num: u64, den: u64) -> f64 {
    if den == 0 {
        0.0
    } else {
        (num as f64 / den as f64) * 100.0
    }
}

impl TifsStats {
    /// Fraction of misses that triggered a replay, in `[0, 1]`.
    pub fn coverage(&self) -> f64 {
        if self.misses == 0 {
            0.0
        } else {
            self.replays as f64 / self.misses as f64
        }
    }

    /// Average prefetches issued per replay.
    pub fn mean_replay_length(&self) -> f64 {
        if self.replays == 0 {
            0.0
        } else {
            self.prefetches_issued as f64 / self.replays as f64
        }
    }

    /// Prints only the requested statistics sections to stdout.
    ///
    /// # Arguments
    ///
    /// * `sections` - Slice of section names to print, or empty for all.
    pub fn print_sections(&self, sections: &[String]) {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);

        println!("\n==========================================================");
        println!("TIFS PREFETCHER STATISTICS");
        println!("==========================================================");
        if want("lookup") {
            println!("INDEX LOOKUPS");
            println!("  tifs.misses            {}", self.misses);
            println!("  tifs.hits_ignored      {}", self.hits_ignored);
            println!(
                "  tifs.index_hits        {} ({:.2}%)",
                self.index_hits,
                percent(self.index_hits, self.misses)
            );
            println!(
                "  tifs.index_misses      {} ({:.2}%)",
                self.index_misses,
                percent(self.index_misses, self.misses)
            );
            println!(
                "  tifs.stale_matches     {} ({:.2}%)",
                self.stale_matches,
                percent(self.stale_matches, self.index_hits)
            );
            println!("----------------------------------------------------------");
        }
        if want("replay") {
            println!("TEMPORAL REPLAY");
            println!(
                "  tifs.replays           {} ({:.2}% of misses)",
                self.replays,
                self.coverage() * 100.0
            );
            println!("  tifs.prefetches        {}", self.prefetches_issued);
            println!("  tifs.replay_len_avg    {:.2}", self.mean_replay_length());
            println!(
                "  tifs.replays_truncated {} ({:.2}%)",
                self.truncated_replays,
                percent(self.truncated_replays, self.replays)
            );
        }
        println!("==========================================================");
    }

    /// Prints all statistics sections to stdout.
    ///
    /// Equivalent to `print_sections(&[])`.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}

impl fmt::Display for TifsStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "misses={} index_hits={} stale={} replays={} prefetches={} coverage={:.2}%",
            self.misses,
            self.index_hits,
            self.stale_matches,
            self.replays,
            self.prefetches_issued,
            self.coverage() * 100.0
        )
    }
}
