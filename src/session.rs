//! Active locale state
//!
//! A [`LocaleSession`] is the single source of truth for which locale is shown.
//! Consumers that re-render on change hold a [`watch::Receiver`] from
//! [`LocaleSession::subscribe`].

use tokio::sync::watch;

use crate::error::LocaleError;
use crate::locale::Locale;

/// Holds the active locale and notifies subscribers when it changes.
#[derive(Debug)]
pub struct LocaleSession {
    /// Locale at creation and after `reset`
    default_locale: Locale,
    /// Locales this session may switch to
    supported: Vec<Locale>,
    /// Current locale; receivers are notified on change
    sender: watch::Sender<Locale>,
}

impl LocaleSession {
    /// Create a session restricted to `supported`, starting at `default_locale`.
    ///
    /// # Errors
    /// `UnsupportedLocale` if `default_locale` is not in `supported`.
    pub fn new(default_locale: Locale, supported: Vec<Locale>) -> Result<Self, LocaleError> {
        if !supported.contains(&default_locale) {
            return Err(LocaleError::UnsupportedLocale(default_locale.code().to_string()));
        }

        let (sender, _) = watch::channel(default_locale);
        Ok(Self { default_locale, supported, sender })
    }

    /// Session over every locale in [`Locale::ALL`].
    #[must_use]
    pub fn with_all_locales(default_locale: Locale) -> Self {
        let (sender, _) = watch::channel(default_locale);
        Self { default_locale, supported: Locale::ALL.to_vec(), sender }
    }

    /// The active locale.
    #[must_use]
    pub fn current(&self) -> Locale {
        *self.sender.borrow()
    }

    #[must_use]
    pub const fn default_locale(&self) -> Locale {
        self.default_locale
    }

    #[must_use]
    pub fn supported(&self) -> &[Locale] {
        &self.supported
    }

    #[must_use]
    pub fn is_supported(&self, locale: Locale) -> bool {
        self.supported.contains(&locale)
    }

    /// Make `locale` the active locale.
    ///
    /// Switching to the active locale is a no-op and does not notify
    /// subscribers.
    ///
    /// # Errors
    /// `UnsupportedLocale` if `locale` is not supported by this session; the
    /// active locale is left unchanged.
    pub fn switch_to(&self, locale: Locale) -> Result<(), LocaleError> {
        if !self.is_supported(locale) {
            tracing::warn!(%locale, "Rejected switch to unsupported locale");
            return Err(LocaleError::UnsupportedLocale(locale.code().to_string()));
        }

        self.set(locale);
        Ok(())
    }

    /// Parse `code` and switch to it.
    ///
    /// # Errors
    /// `UnsupportedLocale` if `code` does not name a supported locale.
    pub fn switch_to_code(&self, code: &str) -> Result<(), LocaleError> {
        let locale: Locale = code.parse()?;
        if !self.is_supported(locale) {
            tracing::warn!(code, "Rejected switch to unsupported locale");
            return Err(LocaleError::UnsupportedLocale(code.to_string()));
        }

        self.set(locale);
        Ok(())
    }

    /// Return to the default locale.
    pub fn reset(&self) {
        self.set(self.default_locale);
    }

    /// Receiver that observes every change of the active locale.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Locale> {
        self.sender.subscribe()
    }

    /// Store `locale`, notifying subscribers only when it differs.
    fn set(&self, locale: Locale) {
        let mut previous = None;
        self.sender.send_if_modified(|current| {
            if *current == locale {
                return false;
            }
            previous = Some(*current);
            *current = locale;
            true
        });

        if let Some(previous) = previous {
            tracing::info!(from = %previous, to = %locale, "Switched locale");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[googletest::test]
    fn starts_at_default_locale() {
        let session = LocaleSession::with_all_locales(Locale::Pt);

        expect_that!(session.current(), eq(Locale::Pt));
        expect_that!(session.default_locale(), eq(Locale::Pt));
        expect_that!(session.supported().len(), eq(4));
    }

    #[googletest::test]
    fn switch_updates_current_and_notifies() {
        let session = LocaleSession::with_all_locales(Locale::Pt);
        let mut receiver = session.subscribe();

        session.switch_to(Locale::En).unwrap();

        expect_that!(session.current(), eq(Locale::En));
        expect_that!(receiver.has_changed().unwrap(), eq(true));
        expect_that!(*receiver.borrow_and_update(), eq(Locale::En));
    }

    #[googletest::test]
    fn switch_to_same_locale_is_idempotent() {
        let session = LocaleSession::with_all_locales(Locale::Pt);
        session.switch_to(Locale::De).unwrap();
        let mut receiver = session.subscribe();
        let _ = receiver.borrow_and_update();

        session.switch_to(Locale::De).unwrap();
        session.switch_to(Locale::De).unwrap();

        expect_that!(session.current(), eq(Locale::De));
        expect_that!(receiver.has_changed().unwrap(), eq(false));
    }

    #[googletest::test]
    fn switch_to_unsupported_locale_is_rejected() {
        let session = LocaleSession::new(Locale::Pt, vec![Locale::Pt, Locale::En]).unwrap();
        let receiver = session.subscribe();

        let result = session.switch_to(Locale::De);

        expect_that!(
            matches!(result, Err(LocaleError::UnsupportedLocale(ref code)) if code == "de"),
            eq(true)
        );
        expect_that!(session.current(), eq(Locale::Pt));
        expect_that!(receiver.has_changed().unwrap(), eq(false));
    }

    #[rstest]
    #[case("fr")]
    #[case("de-DE")]
    #[case("")]
    fn switch_to_code_rejects_unknown_or_unsupported(#[case] code: &str) {
        let session = LocaleSession::new(Locale::Pt, vec![Locale::Pt, Locale::En]).unwrap();
        session.switch_to(Locale::En).unwrap();

        let result = session.switch_to_code(code);

        assert!(matches!(result, Err(LocaleError::UnsupportedLocale(ref value)) if value == code));
        assert_eq!(session.current(), Locale::En);
    }

    #[googletest::test]
    fn switch_to_code_accepts_region_tags() {
        let session = LocaleSession::with_all_locales(Locale::Pt);

        session.switch_to_code("es-MX").unwrap();

        expect_that!(session.current(), eq(Locale::Es));
    }

    #[googletest::test]
    fn new_rejects_default_outside_supported_set() {
        let result = LocaleSession::new(Locale::Pt, vec![Locale::En]);

        expect_that!(result.is_err(), eq(true));
    }

    #[googletest::test]
    fn reset_returns_to_default() {
        let session = LocaleSession::with_all_locales(Locale::Pt);
        session.switch_to(Locale::Es).unwrap();

        session.reset();

        expect_that!(session.current(), eq(Locale::Pt));
    }

    #[googletest::test]
    fn sessions_are_independent() {
        let header = LocaleSession::with_all_locales(Locale::Pt);
        let footer = LocaleSession::with_all_locales(Locale::Pt);

        header.switch_to(Locale::En).unwrap();

        expect_that!(header.current(), eq(Locale::En));
        expect_that!(footer.current(), eq(Locale::Pt));
    }

    #[tokio::test]
    async fn subscriber_wakes_on_change() {
        let session = LocaleSession::with_all_locales(Locale::Pt);
        let mut receiver = session.subscribe();

        let waiter = tokio::spawn(async move {
            receiver.changed().await.unwrap();
            *receiver.borrow_and_update()
        });
        session.switch_to(Locale::De).unwrap();

        assert_eq!(waiter.await.unwrap(), Locale::De);
    }
}
