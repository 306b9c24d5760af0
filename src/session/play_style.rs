use std::fmt;

/// Rough player type implied by a VPIP percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayStyle {
    /// Under 15% VPIP
    Nit,
    /// 15% up to 25%
    Tight,
    /// 25% up to 35%
    Normal,
    /// 35% up to 50%
    Loose,
    /// 50% and above
    Maniac,
}

impl PlayStyle {
    /// Bucket a VPIP percentage in `[0, 100]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_poker_tracker::session::PlayStyle;
    ///
    /// assert_eq!(PlayStyle::from_vpip(12.0), PlayStyle::Nit);
    /// assert_eq!(PlayStyle::from_vpip(25.0), PlayStyle::Normal);
    /// assert_eq!(PlayStyle::from_vpip(80.0), PlayStyle::Maniac);
    /// ```
    pub fn from_vpip(vpip_percent: f64) -> Self {
        if vpip_percent < 15.0 {
            PlayStyle::Nit
        } else if vpip_percent < 25.0 {
            PlayStyle::Tight
        } else if vpip_percent < 35.0 {
            PlayStyle::Normal
        } else if vpip_percent < 50.0 {
            PlayStyle::Loose
        } else {
            PlayStyle::Maniac
        }
    }
}

impl fmt::Display for PlayStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlayStyle::Nit => "nit",
            PlayStyle::Tight => "tight",
            PlayStyle::Normal => "normal",
            PlayStyle::Loose => "loose",
            PlayStyle::Maniac => "maniac",
        };
        f.write_str(name)
    }
}
