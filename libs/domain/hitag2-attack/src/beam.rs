// [libs/domain/hitag2-attack/src/beam.rs]
/*!
 * APARATO: BEAM SEARCH ENGINE
 * RESPONSABILIDAD: AVANZAR EL HAZ UN BIT A LA VEZ, PODANDO A LO SUMO A
 *                   `T` SOBREVIVIENTES POR PASO
 *
 * Cada paso es una máquina de estados explícita: `Extending` (cada
 * candidato produce sus dos hijos), `Scoring` (el dispatcher puntúa los
 * hijos en paralelo), `Pruning` (selección, no orden completo, de los
 * mejores `T`) y `Advanced` (los búferes del haz se intercambian). El
 * ancho del haz nunca excede `2T` entre `Extending` y `Pruning`.
 */

use tracing::instrument;

use crate::candidate::{candidate_order, Beam, Candidate};
use crate::dispatcher::Dispatcher;
use crate::observation::ObservationSet;
use crate::scorer::Scorer;

/// Una de las cuatro fases de un paso del haz, en orden: `Extending` ->
/// `Scoring` -> `Pruning` -> `Advanced`. El dispatcher funde `Extending`
/// y `Scoring` en una sola pasada paralela, de ahí que `advance_one_bit`
/// sólo registre la transición al entrar y no un punto intermedio entre
/// ambas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeamStep {
    /// Cada candidato produce sus dos hijos.
    Extending,
    /// El dispatcher puntúa los hijos en paralelo.
    Scoring,
    /// Selección (no orden completo) de los mejores `T` sobrevivientes.
    Pruning,
    /// Los búferes del haz se intercambiaron; el paso terminó.
    Advanced,
}

impl BeamStep {
    fn as_str(self) -> &'static str {
        match self {
            Self::Extending => "extending",
            Self::Scoring => "scoring",
            Self::Pruning => "pruning",
            Self::Advanced => "advanced",
        }
    }
}

/// Avanza el haz un único bit (de longitud `k` a `k + 1`), puntuando con
/// `dispatcher` y podando a lo sumo a `t` sobrevivientes.
///
/// Instrumentado para que un consumidor de logs pueda reconstruir el
/// ancho del haz y la fase activa a través del tiempo.
#[instrument(
    skip(beam, dispatcher, scorer, observations),
    fields(k = tracing::field::Empty, beam_len = tracing::field::Empty, step = tracing::field::Empty)
)]
pub fn advance_one_bit(
    beam: &mut Beam,
    dispatcher: &Dispatcher,
    scorer: &Scorer,
    observations: &ObservationSet,
    t: usize,
) {
    let span = tracing::Span::current();
    let k = beam.current().first().map_or(0, |c| c.len);
    span.record("k", k);
    span.record("beam_len", beam.current().len());

    span.record("step", BeamStep::Extending.as_str());
    span.record("step", BeamStep::Scoring.as_str());
    let children = dispatcher.extend_and_score(beam.current(), scorer, observations);

    span.record("step", BeamStep::Pruning.as_str());
    let pruned = prune(children, t);

    span.record("step", BeamStep::Advanced.as_str());
    beam.advance(pruned);
}

/// Poda `children` a lo sumo a `t`, usando una selección parcial
/// (`select_nth_unstable_by`) seguida de un orden determinista del
/// subconjunto retenido.
fn prune(mut children: Vec<Candidate>, t: usize) -> Vec<Candidate> {
    if children.len() > t && t > 0 {
        children.select_nth_unstable_by(t - 1, candidate_order);
        children.truncate(t);
    }
    children.sort_by(candidate_order);
    children
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::Candidate;

    #[test]
    fn beam_step_labels_are_distinct() {
        let labels = [BeamStep::Extending, BeamStep::Scoring, BeamStep::Pruning, BeamStep::Advanced]
            .map(BeamStep::as_str);
        for (i, a) in labels.iter().enumerate() {
            for (j, b) in labels.iter().enumerate() {
                assert_eq!(i == j, a == b);
            }
        }
    }

    #[test]
    fn prune_keeps_exactly_t_best_candidates() {
        let children: Vec<Candidate> = (0..10)
            .map(|i| Candidate { state: i, len: 1, score: -(i as f64) })
            .collect();
        let pruned = prune(children, 3);
        assert_eq!(pruned.len(), 3);
        // Lower `i` means higher score (less negative); the best three are 0, 1, 2.
        assert_eq!(pruned[0].state, 0);
        assert_eq!(pruned[1].state, 1);
        assert_eq!(pruned[2].state, 2);
    }

    #[test]
    fn prune_is_a_no_op_when_under_capacity() {
        let children: Vec<Candidate> = (0..3)
            .map(|i| Candidate { state: i, len: 1, score: -(i as f64) })
            .collect();
        let pruned = prune(children, 100);
        assert_eq!(pruned.len(), 3);
    }

    #[test]
    fn prune_preserves_sorted_order_of_survivors() {
        let children: Vec<Candidate> = vec![
            Candidate { state: 9, len: 1, score: -0.1 },
            Candidate { state: 1, len: 1, score: -5.0 },
            Candidate { state: 4, len: 1, score: -2.0 },
        ];
        let pruned = prune(children, 2);
        assert_eq!(pruned.len(), 2);
        assert!(pruned[0].score >= pruned[1].score);
    }
}
