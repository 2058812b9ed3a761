// [libs/domain/hitag2-attack/src/dispatcher.rs]
/*!
 * APARATO: PARALLEL DISPATCHER
 * RESPONSABILIDAD: DISTRIBUIR LA EXTENSIÓN Y PUNTUACIÓN DEL HAZ SOBRE UN
 *                   GRUPO DE HILOS DEDICADO
 *
 * Un `rayon::ThreadPool` propio (no el pool global) se construye una vez
 * por corrida y se descarta al final de `recover_key`: ningún estado de
 * hilos persiste entre llamadas. `workers == 0` cae en `num_cpus::get()`,
 * el mismo valor por defecto de paralelismo de hardware que usa el resto
 * del flujo.
 */

use rayon::prelude::*;
use rayon::ThreadPool;

use crate::candidate::Candidate;
use crate::error::AttackError;
use crate::observation::ObservationSet;
use crate::scorer::Scorer;

/// Agrupa el `rayon::ThreadPool` dedicado a una corrida de recuperación.
pub struct Dispatcher {
    pool: ThreadPool,
}

impl Dispatcher {
    /// Construye un dispatcher con `workers` hilos, o `num_cpus::get()`
    /// si `workers == 0`.
    pub fn new(workers: u32) -> Result<Self, AttackError> {
        let threads = if workers == 0 { num_cpus::get() } else { workers as usize };
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|e| AttackError::ResourceError(e.to_string()))?;
        Ok(Self { pool })
    }

    /// Extiende cada candidato de `current` en sus dos hijos y puntúa
    /// cada uno contra `observations`, en paralelo.
    ///
    /// La asignación de cada índice de entrada a su par de hijos de
    /// salida es estable sin importar cómo `rayon` reparta los trozos
    /// entre hilos del sistema operativo: el resultado es siempre el
    /// mismo vector, en el mismo orden, para la misma entrada.
    pub fn extend_and_score(&self, current: &[Candidate], scorer: &Scorer, observations: &ObservationSet) -> Vec<Candidate> {
        self.pool.install(|| {
            current
                .par_iter()
                .flat_map_iter(|parent| {
                    let [zero_child, one_child] = parent.fork();
                    [
                        score_child(zero_child, parent.len, scorer, observations),
                        score_child(one_child, parent.len, scorer, observations),
                    ]
                    .into_iter()
                })
                .collect()
        })
    }
}

fn score_child(mut child: Candidate, parent_len: u8, scorer: &Scorer, observations: &ObservationSet) -> Candidate {
    child.score += scorer.score_delta(child.state, parent_len, child.len, observations);
    child
}
