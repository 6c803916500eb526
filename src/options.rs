//! Table and chat configuration options.

#[cfg(feature = "std")]
use core::time::Duration;
#[cfg(feature = "std")]
use std::path::{Path, PathBuf};

/// Configuration options for a blackjack table.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use bjchat::TableOptions;
///
/// let options = TableOptions::default()
///     .with_decks(8)
///     .with_cut_depth(50, 60)
///     .with_reshuffle_at_break(false);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOptions {
    /// Number of decks in the shoe.
    pub decks: u8,
    /// Fewest cards that may follow the break marker.
    pub cut_depth_min: usize,
    /// Most cards that may follow the break marker.
    pub cut_depth_max: usize,
    /// Dealer draws while their high total is below this.
    pub dealer_stands_at: u8,
    /// Whether a fresh shoe is built on the next deal once the break marker
    /// has been passed.
    pub reshuffle_at_break: bool,
    /// Whether a player blackjack against a dealer blackjack is a push.
    /// Off by default: a player natural wins without checking the dealer.
    pub push_on_double_blackjack: bool,
    /// Pause between dealer draws.
    #[cfg(feature = "std")]
    pub dealer_pace: Duration,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            decks: 6,
            cut_depth_min: 60,
            cut_depth_max: 75,
            dealer_stands_at: 17,
            reshuffle_at_break: true,
            push_on_double_blackjack: false,
            #[cfg(feature = "std")]
            dealer_pace: Duration::from_secs(1),
        }
    }
}

impl TableOptions {
    /// Sets the number of decks.
    ///
    /// # Example
    ///
    /// ```
    /// use bjchat::TableOptions;
    ///
    /// let options = TableOptions::default().with_decks(2);
    /// assert_eq!(options.decks, 2);
    /// ```
    #[must_use]
    pub const fn with_decks(mut self, decks: u8) -> Self {
        self.decks = decks;
        self
    }

    /// Sets the range the break marker depth is drawn from.
    ///
    /// # Example
    ///
    /// ```
    /// use bjchat::TableOptions;
    ///
    /// let options = TableOptions::default().with_cut_depth(40, 52);
    /// assert_eq!((options.cut_depth_min, options.cut_depth_max), (40, 52));
    /// ```
    #[must_use]
    pub const fn with_cut_depth(mut self, min: usize, max: usize) -> Self {
        self.cut_depth_min = min;
        self.cut_depth_max = max;
        self
    }

    /// Sets the total the dealer stands on.
    #[must_use]
    pub const fn with_dealer_stands_at(mut self, total: u8) -> Self {
        self.dealer_stands_at = total;
        self
    }

    /// Sets whether the shoe is rebuilt after the break marker.
    ///
    /// # Example
    ///
    /// ```
    /// use bjchat::TableOptions;
    ///
    /// let options = TableOptions::default().with_reshuffle_at_break(false);
    /// assert!(!options.reshuffle_at_break);
    /// ```
    #[must_use]
    pub const fn with_reshuffle_at_break(mut self, reshuffle: bool) -> Self {
        self.reshuffle_at_break = reshuffle;
        self
    }

    /// Sets whether two naturals push instead of paying the player.
    #[must_use]
    pub const fn with_push_on_double_blackjack(mut self, push: bool) -> Self {
        self.push_on_double_blackjack = push;
        self
    }

    /// Sets the pause between dealer draws.
    ///
    /// # Example
    ///
    /// ```
    /// use std::time::Duration;
    /// use bjchat::TableOptions;
    ///
    /// let options = TableOptions::default().with_dealer_pace(Duration::from_millis(250));
    /// assert_eq!(options.dealer_pace, Duration::from_millis(250));
    /// ```
    #[cfg(feature = "std")]
    #[must_use]
    pub const fn with_dealer_pace(mut self, pace: Duration) -> Self {
        self.dealer_pace = pace;
        self
    }
}

/// Where the chat relay files live and how often the feed is polled.
#[cfg(feature = "std")]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatOptions {
    /// Append-only file each session writes outgoing messages to.
    pub outbox_path: PathBuf,
    /// Append-only broadcast file every session reads.
    pub feed_path: PathBuf,
    /// How often the feed is checked for new lines.
    pub poll_interval: Duration,
}

#[cfg(feature = "std")]
impl Default for ChatOptions {
    fn default() -> Self {
        Self::in_dir("/tmp")
    }
}

#[cfg(feature = "std")]
impl ChatOptions {
    /// Uses the standard file names inside `dir`.
    ///
    /// # Example
    ///
    /// ```
    /// use bjchat::ChatOptions;
    ///
    /// let options = ChatOptions::in_dir("/var/run/bjchat");
    /// assert!(options.feed_path.ends_with("ssh-chat.log"));
    /// ```
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            outbox_path: dir.join("ssh-chat-messages.log"),
            feed_path: dir.join("ssh-chat.log"),
            poll_interval: Duration::from_secs(1),
        }
    }

    /// Sets the feed poll interval.
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}
