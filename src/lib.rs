//! property-i18n
//!
//! 不動産サイト向けのロケール管理ライブラリ。翻訳カタログの読み込みとキャッシュ、
//! ドット区切りキーの解決、表示ロケールの切り替え、ロケールに応じた価格・面積・
//! 日付のフォーマットを提供します。
//!
//! ```
//! use property_i18n::catalog::MemorySource;
//! use property_i18n::{KeyResolver, Locale, LocaleService, LocaleSession};
//!
//! # tokio_test::block_on(async {
//! let service = LocaleService::new(
//!     MemorySource::builtin(),
//!     LocaleSession::with_all_locales(Locale::Pt),
//!     KeyResolver::default(),
//! );
//!
//! let en = service.switch_locale(Locale::En).await.unwrap();
//! assert_eq!(en.t("nav.about"), "About");
//! assert_eq!(en.t("nav.blog"), "nav.blog");
//! # });
//! ```

pub mod catalog;
pub mod config;
pub mod coverage;
pub mod error;
pub mod format;
pub mod locale;
pub mod resolver;
pub mod service;
pub mod session;

#[cfg(test)]
mod test_utils;

pub use config::ConfigManager;
pub use coverage::CoverageReport;
pub use error::LocaleError;
pub use locale::Locale;
pub use resolver::{
    KeyResolver,
    Resolution,
    resolve,
};
pub use service::{
    LocaleService,
    Translator,
};
pub use session::LocaleSession;
