//! Game configuration options.

/// Balance given to a new wallet and restored by a reset.
pub const DEFAULT_BALANCE: usize = 100;

/// The dealer stops drawing once its score reaches this value.
pub const DEALER_STANDS_ON: u8 = 17;

/// Configuration options for a blackjack table.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use bjsolo::GameOptions;
///
/// let options = GameOptions::default()
///     .with_starting_balance(250)
///     .with_auto_stand_on_21(false);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameOptions {
    /// Balance for a fresh wallet and after a reset.
    pub starting_balance: usize,
    /// Whether a hit that reaches 21 stands automatically.
    pub auto_stand_on_21: bool,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            starting_balance: DEFAULT_BALANCE,
            auto_stand_on_21: true,
        }
    }
}

impl GameOptions {
    /// Sets the starting balance.
    ///
    /// # Example
    ///
    /// ```
    /// use bjsolo::GameOptions;
    ///
    /// let options = GameOptions::default().with_starting_balance(500);
    /// assert_eq!(options.starting_balance, 500);
    /// ```
    #[must_use]
    pub const fn with_starting_balance(mut self, balance: usize) -> Self {
        self.starting_balance = balance;
        self
    }

    /// Sets whether reaching 21 by hitting stands automatically.
    ///
    /// # Example
    ///
    /// ```
    /// use bjsolo::GameOptions;
    ///
    /// let options = GameOptions::default().with_auto_stand_on_21(false);
    /// assert_eq!(options.auto_stand_on_21, false);
    /// ```
    #[must_use]
    pub const fn with_auto_stand_on_21(mut self, enabled: bool) -> Self {
        self.auto_stand_on_21 = enabled;
        self
    }
}
