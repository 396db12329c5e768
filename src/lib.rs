//! searx-ping
//!
//! Measures how quickly a list of public SearXNG / Searx instances answer a
//! fixed set of search queries and ranks them fastest first. Instances are
//! probed concurrently behind a bounded admission gate; queries to one
//! instance are sequential and spaced by a politeness delay.

pub mod app;
pub mod cli;
pub mod config;
pub mod client;
pub mod error;
pub mod executor;
pub mod logging;
pub mod models;
pub mod output;
pub mod stats;
pub mod types;

// Re-export commonly used types
pub use error::{AppError, Result};
pub use models::{Config, EndpointResult, Measurement};
pub use types::Latency;
pub use executor::{AdmissionGate, Prober, ProbeObserver};
pub use stats::{mean_latency, rank_results, RunSummary};
pub use output::{ReportFormatter, ColoredFormatter, PlainFormatter, OutputFormatterFactory};

/// Application version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Default configuration values
pub mod defaults {
    use std::time::Duration;

    /// Number of instances probed at the same time
    pub const MAX_CONCURRENT_PROBES: usize = 5;
    /// Pause between consecutive queries to one instance
    pub const POLITENESS_DELAY: Duration = Duration::from_secs(2);
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
    pub const DEFAULT_ENABLE_COLOR: bool = true;

    pub const DEFAULT_QUERIES: &[&str] = &[
        "quantum engineering",
        "artificial intelligence",
        "machine learning",
        "deep learning",
        "neural networks",
    ];

    /// Public instances benchmarked when none are configured.
    /// The onion address needs a Tor SOCKS proxy (`ALL_PROXY=socks5h://127.0.0.1:9050`).
    pub const DEFAULT_INSTANCES: &[&str] = &[
        "http://lbmegc3rjnekmdxuisynqdc7y3m2tgyq7gj257ooddaobxqjw36bdayd.onion",
        "https://baresearch.org",
        "https://copp.gg",
        "https://darmarit.org/searx",
        "https://etsi.me",
        "https://fairsuch.net",
        "https://northboot.xyz",
        "https://nyc1.sx.ggtyler.dev",
        "https://ooglester.com",
        "https://opnxng.com",
        "https://paulgo.io",
        "https://priv.au",
        "https://s.mble.dk",
        "https://s.trung.fun",
        "https://search.bus-hit.me",
        "https://search.charliewhiskey.net",
        "https://search.citw.lgbt",
        "https://search.darkness.services",
        "https://search.datura.network",
        "https://search.demoniak.ch",
        "https://search.dotone.nl",
        "https://search.einfachzocken.eu",
        "https://search.gcomm.ch",
        "https://search.hbubli.cc",
        "https://search.im-in.space",
        "https://search.in.projectsegfau.lt",
        "https://search.incogniweb.net",
        "https://search.indst.eu",
        "https://search.inetol.net",
        "https://search.ldne.xyz",
        "https://search.leptons.xyz",
        "https://search.mdosch.de",
        "https://search.nadeko.net",
        "https://search.nerdvpn.de",
        "https://search.ngn.tf",
        "https://search.ononoki.org",
        "https://search.privacyredirect.com",
        "https://search.projectsegfau.lt",
        "https://search.rhscz.eu",
        "https://search.rowie.at",
        "https://search.sapti.me",
        "https://search.smnz.de",
        "https://search.us.projectsegfau.lt",
        "https://searx.aleteoryx.me",
        "https://searx.ankha.ac",
        "https://searx.ari.lt",
        "https://searx.baczek.me",
        "https://searx.be",
        "https://searx.catfluori.de",
        "https://searx.colbster937.dev",
        "https://searx.daetalytica.io",
        "https://searx.dresden.network",
        "https://searx.foss.family",
        "https://searx.hu",
        "https://searx.juancord.xyz",
        "https://searx.lunar.icu",
        "https://searx.namejeff.xyz",
        "https://searx.nobulart.com",
        "https://searx.numeriquement.fr",
        "https://searx.oakleycord.dev",
        "https://searx.ox2.fr",
        "https://searx.perennialte.ch",
        "https://searx.rhscz.eu",
        "https://searx.sev.monster",
        "https://searx.techsaviours.org",
        "https://searx.tiekoetter.com",
        "https://searx.tuxcloud.net",
        "https://searx.work",
        "https://searx.zhenyapav.com",
        "https://searxng.brihx.fr",
        "https://searxng.ca",
        "https://searxng.ch",
        "https://searxng.hweeren.com",
        "https://searxng.online",
        "https://searxng.shreven.org",
        "https://searxng.site",
        "https://skyrimhater.com",
        "https://sx.catgirl.cloud",
        "https://sx.thatxtreme.dev",
        "https://sxng.violets-purgatory.dev",
        "https://vanderwilhelm.me",
        "https://www.gruble.de",
        "https://www.jabber-germany.de/searx",
        "https://xo.wtf",
    ];
}
