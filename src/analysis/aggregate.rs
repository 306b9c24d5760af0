use crate::session::Session;

/// Bankroll figures across many sessions.
///
/// Money and hours only come from sessions with both a buy in and a cash
/// out, so that profit and time are measured over the same sessions. Hand
/// counts and VPIP come from every session.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct AggregateStats {
    pub total_profit: f64,
    /// Every session, with or without financials.
    pub total_sessions: usize,
    pub total_hands: usize,
    /// Share of financial sessions that made money. 0 without any.
    pub win_rate_percent: f64,
    /// Average VPIP over sessions that logged at least one hand.
    pub avg_vpip_percent: f64,
    /// Profit per hour. 0 means there wasn't enough time data, not that
    /// the player broke even.
    pub hourly_rate: f64,

    pub total_buy_in: f64,
    pub total_cash_out: f64,
    /// Sessions with both a buy in and a cash out.
    pub financial_sessions: usize,
    pub avg_buy_in: f64,
    pub avg_profit: f64,
    pub total_hours: f64,
    /// Part of `total_hours` guessed from hand counts rather than measured.
    /// Anything shown from it should be labelled as an estimate.
    pub estimated_hours: f64,
}

impl AggregateStats {
    pub(crate) fn compute(sessions: &[Session], minutes_per_hand: f64) -> Self {
        let mut stats = Self {
            total_sessions: sessions.len(),
            ..Default::default()
        };

        let mut winning = 0;
        let mut vpip_sum = 0.0;
        let mut vpip_sessions = 0;

        for session in sessions {
            let hands = session.total_hands();
            stats.total_hands += hands;
            if hands > 0 {
                vpip_sum += session.vpip_percent();
                vpip_sessions += 1;
            }

            let (Some(buy_in), Some(cash_out)) = (session.buy_in, session.cash_out) else {
                continue;
            };

            stats.financial_sessions += 1;
            stats.total_buy_in += buy_in;
            stats.total_cash_out += cash_out;
            if cash_out > buy_in {
                winning += 1;
            }

            // Measured time first, then the per hand estimate as a last resort.
            if let Some(hours) = session.duration_hours() {
                stats.total_hours += hours;
            } else if hands > 0 {
                let estimate = hands as f64 * minutes_per_hand / 60.0;
                stats.total_hours += estimate;
                stats.estimated_hours += estimate;
            }
        }

        stats.total_profit = stats.total_cash_out - stats.total_buy_in;

        if stats.financial_sessions > 0 {
            let n = stats.financial_sessions as f64;
            stats.win_rate_percent = winning as f64 / n * 100.0;
            stats.avg_buy_in = stats.total_buy_in / n;
            stats.avg_profit = stats.total_profit / n;
        }
        if vpip_sessions > 0 {
            stats.avg_vpip_percent = vpip_sum / vpip_sessions as f64;
        }
        if stats.total_hours > 0.0 {
            stats.hourly_rate = stats.total_profit / stats.total_hours;
        }

        stats
    }

    /// Did any of the hours come from the per hand estimate.
    pub fn hours_are_estimated(&self) -> bool {
        self.estimated_hours > 0.0
    }
}

/// One session on the bankroll chart.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct BankrollPoint {
    /// 1-based session number, as text for the chart axis.
    pub label: String,
    pub session_id: String,
    /// Profit of this session alone.
    pub profit: f64,
    /// Running total of profit up to and including this session.
    pub bankroll: f64,
}

/// Cumulative profit over the sessions that have financials, oldest first.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BankrollSeries {
    pub points: Vec<BankrollPoint>,
}

impl BankrollSeries {
    pub(crate) fn compute(sessions: &[Session]) -> Self {
        let mut financial: Vec<(&Session, f64)> = sessions
            .iter()
            .filter_map(|s| s.profit().map(|profit| (s, profit)))
            .collect();
        // Undated sessions go last, keeping their storage order.
        financial.sort_by_key(|(s, _)| {
            let when = s.created_at.or_else(|| s.sort_time());
            (when.is_none(), when)
        });

        let mut bankroll = 0.0;
        let points = financial
            .into_iter()
            .enumerate()
            .map(|(idx, (session, profit))| {
                bankroll += profit;
                BankrollPoint {
                    label: (idx + 1).to_string(),
                    session_id: session.id().to_string(),
                    profit,
                    bankroll,
                }
            })
            .collect();

        Self { points }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Final bankroll, 0 with no sessions.
    pub fn final_bankroll(&self) -> f64 {
        self.points.last().map_or(0.0, |p| p.bankroll)
    }
}
