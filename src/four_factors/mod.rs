use crate::pbp::Event;

/// Dean Oliver's four factors plus the shooting counts behind them,
/// one row per team per game. Percentages are on a 0-100 scale and
/// rounded to one decimal, possessions are estimated from the box
/// counts rather than the possession tracker so the numbers match the
/// standard formula.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamFactors {
    pub game_id: i64,
    pub team_id: i64,
    pub field_goals_attempted: u32,
    pub field_goals_made: u32,
    pub threes_attempted: u32,
    pub threes_made: u32,
    pub twos_attempted: u32,
    pub twos_made: u32,
    pub free_throws_attempted: u32,
    pub free_throws_made: u32,
    pub turnovers: u32,
    pub offensive_rebounds: u32,
    pub defensive_rebounds: u32,
    pub opponent_defensive_rebounds: u32,
    pub possessions: f64,
    pub effective_fg_pct: f64,
    pub turnover_pct: f64,
    pub offensive_rebound_pct: f64,
    pub free_throw_rate: f64,
    pub three_point_rate: f64,
    pub tempo: f64,
}

/// Computes per-team factors from the normalized event stream, in team
/// order of first appearance.
pub fn compute_four_factors(game_id: i64, events: &[Event]) -> Vec<TeamFactors> {
    let teams = observed_teams(events);
    let total_periods = events.iter().map(|e| e.period).max().unwrap_or(2);
    // 40 regulation minutes, 5 per overtime.
    let minutes: f64 = if total_periods <= 2 {
        40.0
    } else {
        40.0 + (total_periods - 2) as f64 * 5.0
    };

    let mut factors = Vec::with_capacity(teams.len());
    for &team in &teams {
        let opponent = teams.iter().copied().find(|&t| t != team);
        let opponent_drb = opponent
            .map(|opp| count_rebounds(events, opp, "Defensive Rebound"))
            .unwrap_or(0);

        let mut fga = 0u32;
        let mut fgm = 0u32;
        let mut tpa = 0u32;
        let mut tpm = 0u32;
        let mut fta = 0u32;
        let mut ftm = 0u32;
        let mut tov = 0u32;
        for event in events.iter().filter(|e| e.team_id == Some(team)) {
            if event.is_field_goal_attempt() {
                fga += 1;
                let made = event.made_shot();
                if made {
                    fgm += 1;
                }
                if is_three_attempt(event) {
                    tpa += 1;
                    if made {
                        tpm += 1;
                    }
                }
            } else if event.type_is("MadeFreeThrow") {
                fta += 1;
                if event.made_shot() {
                    ftm += 1;
                }
            } else if event.type_contains("Turnover") {
                tov += 1;
            }
        }
        let orb = count_rebounds(events, team, "Offensive Rebound");
        let drb = count_rebounds(events, team, "Defensive Rebound");

        let possessions = fga as f64 - orb as f64 + tov as f64 + 0.475 * fta as f64;
        let efg = if fga > 0 {
            (fgm as f64 + 0.5 * tpm as f64) / fga as f64 * 100.0
        } else {
            0.0
        };
        let turnover_pct = if possessions != 0.0 {
            tov as f64 / possessions * 100.0
        } else {
            0.0
        };
        let rebound_chances = orb + opponent_drb;
        let orb_pct = if rebound_chances > 0 {
            orb as f64 / rebound_chances as f64 * 100.0
        } else {
            0.0
        };
        let ft_rate = if fga > 0 {
            fta as f64 / fga as f64 * 100.0
        } else {
            0.0
        };
        let three_rate = if fga > 0 {
            tpa as f64 / fga as f64 * 100.0
        } else {
            0.0
        };
        let tempo = possessions / (minutes / 40.0);

        factors.push(TeamFactors {
            game_id,
            team_id: team,
            field_goals_attempted: fga,
            field_goals_made: fgm,
            threes_attempted: tpa,
            threes_made: tpm,
            twos_attempted: fga - tpa,
            twos_made: fgm - tpm,
            free_throws_attempted: fta,
            free_throws_made: ftm,
            turnovers: tov,
            offensive_rebounds: orb,
            defensive_rebounds: drb,
            opponent_defensive_rebounds: opponent_drb,
            possessions: round1(possessions),
            effective_fg_pct: round1(efg),
            turnover_pct: round1(turnover_pct),
            offensive_rebound_pct: round1(orb_pct),
            free_throw_rate: round1(ft_rate),
            three_point_rate: round1(three_rate),
            tempo: round1(tempo),
        });
    }
    factors
}

fn observed_teams(events: &[Event]) -> Vec<i64> {
    let mut teams = Vec::new();
    for event in events {
        if let Some(team) = event.team_id {
            if !teams.contains(&team) {
                teams.push(team);
            }
        }
    }
    teams
}

fn count_rebounds(events: &[Event], team: i64, play_type: &str) -> u32 {
    events
        .iter()
        .filter(|e| e.team_id == Some(team) && e.type_is(play_type))
        .count() as u32
}

fn is_three_attempt(event: &Event) -> bool {
    match &event.shot {
        Some(detail) => detail.range.is_three(),
        None => event.text_contains("three point"),
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pbp::EventKind;

    const TEAM_A: i64 = 10;
    const TEAM_B: i64 = 20;

    fn event(
        ordinal: usize,
        period: u32,
        team: Option<i64>,
        play_type: &str,
        text: &str,
    ) -> Event {
        Event {
            event_id: ordinal as i64,
            game_id: 5,
            period,
            seconds_remaining: 1200 - ordinal as i64 * 10,
            sequence_hint: ordinal as i64,
            feed_index: ordinal,
            kind: EventKind::Other,
            team_id: team,
            participant_ids: vec![],
            shot: None,
            play_type: Some(play_type.to_string()),
            play_text: text.to_string(),
            home_score: None,
            away_score: None,
            unclassified: false,
        }
    }

    fn fixture() -> Vec<Event> {
        vec![
            event(0, 1, Some(TEAM_A), "JumpShot", "Alice makes a three point jumper"),
            event(1, 1, Some(TEAM_A), "JumpShot", "Alice misses a three point jumper"),
            event(2, 1, Some(TEAM_A), "LayUpShot", "Alice makes a layup"),
            event(3, 1, Some(TEAM_A), "JumpShot", "Alice misses a jumper"),
            event(4, 1, Some(TEAM_A), "MadeFreeThrow", "Alice made Free Throw 1 of 2"),
            event(5, 1, Some(TEAM_A), "MadeFreeThrow", "Alice missed Free Throw 2 of 2"),
            event(6, 1, Some(TEAM_A), "LostBallTurnover", "Alice loses the ball"),
            event(7, 1, Some(TEAM_A), "Offensive Rebound", "Alice offensive rebound"),
            event(8, 1, Some(TEAM_A), "Defensive Rebound", "Alice defensive rebound"),
            event(9, 1, Some(TEAM_B), "Defensive Rebound", "Bob defensive rebound"),
            event(10, 1, Some(TEAM_B), "Defensive Rebound", "Bob defensive rebound"),
            event(11, 1, Some(TEAM_B), "JumpShot", "Bob makes a jumper"),
        ]
    }

    #[test]
    fn test_shooting_counts() {
        let factors = compute_four_factors(5, &fixture());
        let a = &factors[0];
        assert_eq!(a.team_id, TEAM_A);
        assert_eq!(a.field_goals_attempted, 4);
        assert_eq!(a.field_goals_made, 2);
        assert_eq!(a.threes_attempted, 2);
        assert_eq!(a.threes_made, 1);
        assert_eq!(a.twos_attempted, 2);
        assert_eq!(a.twos_made, 1);
        assert_eq!(a.free_throws_attempted, 2);
        assert_eq!(a.free_throws_made, 1);
        assert_eq!(a.turnovers, 1);
        assert_eq!(a.offensive_rebounds, 1);
        assert_eq!(a.defensive_rebounds, 1);
        assert_eq!(a.opponent_defensive_rebounds, 2);
    }

    #[test]
    fn test_factor_formulas() {
        let factors = compute_four_factors(5, &fixture());
        let a = &factors[0];
        // 4 FGA - 1 ORB + 1 TOV + 0.475 * 2 FTA = 4.95, the half rounds up.
        assert_eq!(a.possessions, 5.0);
        // (2 + 0.5 * 1) / 4
        assert_eq!(a.effective_fg_pct, 62.5);
        assert_eq!(a.turnover_pct, 20.2);
        // 1 / (1 + 2)
        assert_eq!(a.offensive_rebound_pct, 33.3);
        assert_eq!(a.free_throw_rate, 50.0);
        assert_eq!(a.three_point_rate, 50.0);
        // Single period, regulation pace baseline.
        assert_eq!(a.tempo, 5.0);
    }

    #[test]
    fn test_opponent_view() {
        let factors = compute_four_factors(5, &fixture());
        let b = &factors[1];
        assert_eq!(b.team_id, TEAM_B);
        assert_eq!(b.field_goals_attempted, 1);
        assert_eq!(b.field_goals_made, 1);
        assert_eq!(b.opponent_defensive_rebounds, 1);
        assert_eq!(b.effective_fg_pct, 100.0);
    }

    #[test]
    fn test_overtime_stretches_tempo_minutes() {
        let mut events = fixture();
        events.push(event(12, 3, Some(TEAM_A), "JumpShot", "Alice misses a jumper"));
        let factors = compute_four_factors(5, &events);
        let a = &factors[0];
        // 5 FGA - 1 ORB + 1 TOV + 0.95 = 5.95 possessions over 45 minutes.
        assert_eq!(a.possessions, 6.0);
        assert_eq!(a.tempo, round1(5.95 / (45.0 / 40.0)));
    }

    #[test]
    fn test_no_attempts_yields_zero_rates() {
        let events = vec![event(0, 1, Some(TEAM_A), "LostBallTurnover", "Alice loses it")];
        let factors = compute_four_factors(5, &events);
        let a = &factors[0];
        assert_eq!(a.field_goals_attempted, 0);
        assert_eq!(a.effective_fg_pct, 0.0);
        assert_eq!(a.free_throw_rate, 0.0);
        // One turnover is the whole possession count.
        assert_eq!(a.turnover_pct, 100.0);
    }
}
