/// Synchronised "bounce and drop" movement of the enemy grid.

use crate::config::Tuning;
use crate::entities::Enemy;
use crate::geometry::ENEMY_SIZE;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FormationReport {
    /// The grid hit a wall this tick and turned around.
    pub reversed: bool,
    /// An enemy crossed the loss line.
    pub breached: bool,
}

fn at_edge(enemy: &Enemy, tuning: &Tuning) -> bool {
    let right_limit = tuning.screen_width - ENEMY_SIZE - tuning.edge_margin;
    (enemy.x < tuning.edge_margin && enemy.direction < 0.0)
        || (enemy.x > right_limit && enemy.direction > 0.0)
}

/// One pass over the formation. Entering and exploding enemies neither
/// trigger nor follow a reversal.
pub fn update_formation(enemies: &mut [Enemy], tuning: &Tuning) -> FormationReport {
    let reversed = enemies
        .iter()
        .filter(|e| e.in_formation_phase())
        .any(|e| at_edge(e, tuning));

    if reversed {
        for enemy in enemies.iter_mut().filter(|e| e.in_formation_phase()) {
            enemy.direction = -enemy.direction;
            enemy.target_y = enemy.y + tuning.descent_step;
        }
    }

    let breached = enemies
        .iter()
        .filter(|e| !e.exploding)
        .any(|e| e.y > tuning.loss_line);

    FormationReport { reversed, breached }
}
