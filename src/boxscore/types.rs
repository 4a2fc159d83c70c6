/// One player's accumulated line for a game, split by shot range.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoxScoreLine {
    pub game_id: i64,
    pub player_id: i64,
    pub team_id: Option<i64>,
    pub points: u32,
    pub rim_made: u32,
    pub rim_attempts: u32,
    pub jumper_made: u32,
    pub jumper_attempts: u32,
    pub three_made: u32,
    pub three_attempts: u32,
    pub ft_made: u32,
    pub ft_attempts: u32,
    pub assists: u32,
}

impl BoxScoreLine {
    pub fn new(game_id: i64, player_id: i64) -> Self {
        Self {
            game_id,
            player_id,
            ..Default::default()
        }
    }

    pub fn field_goals_made(&self) -> u32 {
        self.rim_made + self.jumper_made + self.three_made
    }

    pub fn field_goal_attempts(&self) -> u32 {
        self.rim_attempts + self.jumper_attempts + self.three_attempts
    }
}
