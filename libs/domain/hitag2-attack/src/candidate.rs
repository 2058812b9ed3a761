// [libs/domain/hitag2-attack/src/candidate.rs]
/*!
 * APARATO: CANDIDATE & BEAM
 * RESPONSABILIDAD: REPRESENTACIÓN DE ESTADO PARCIAL Y SU ARENA DE
 *                   DOBLE BÚFER
 *
 * `Candidate` es la tupla (estado parcial, longitud, puntaje) sobre la
 * que opera toda la búsqueda en haz. `Beam` posee dos búferes de
 * capacidad `2T` pre-reservados: el dispatcher escribe las extensiones
 * en el búfer "siguiente" mientras lee el búfer "actual", y
 * `Beam::advance` los intercambia al final de cada paso.
 */

/// Un candidato: los `len` bits menos significativos de un estado
/// inicial de 48 bits, más su puntaje de log-verosimilitud acumulado.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// Los `len` bits bajos fijan el estado parcial; el resto son cero.
    pub state: u64,
    /// Cuántos bits de estado están fijados (0..=48).
    pub len: u8,
    /// Puntaje de log-verosimilitud acumulado (no positivo).
    pub score: f64,
}

impl Candidate {
    /// El candidato inicial: longitud 0, puntaje 0.
    #[must_use]
    pub fn root() -> Self {
        Self { state: 0, len: 0, score: 0.0 }
    }

    /// Produce los dos hijos de extender este candidato por un bit más,
    /// heredando el puntaje del padre como punto de partida (transición
    /// `Extending`).
    #[must_use]
    pub fn fork(self) -> [Candidate; 2] {
        let bit_value = 1u64 << self.len;
        [
            Candidate { state: self.state, len: self.len + 1, score: self.score },
            Candidate { state: self.state | bit_value, len: self.len + 1, score: self.score },
        ]
    }
}

/// Comparador determinista: puntaje descendente, luego estado ascendente
/// como desempate por el valor numérico del estado parcial.
#[must_use]
pub fn candidate_order(a: &Candidate, b: &Candidate) -> std::cmp::Ordering {
    b.score
        .partial_cmp(&a.score)
        .unwrap_or(std::cmp::Ordering::Equal)
        .then_with(|| a.state.cmp(&b.state))
}

/// Arena de doble búfer para el haz, de capacidad `2 * t` por lado.
pub struct Beam {
    current: Vec<Candidate>,
    next: Vec<Candidate>,
}

impl Beam {
    /// Crea un haz nuevo con un único candidato raíz y capacidad `t`.
    #[must_use]
    pub fn new(t: usize) -> Self {
        let capacity = 2 * t.max(1);
        let mut current = Vec::with_capacity(capacity);
        current.push(Candidate::root());
        Self { current, next: Vec::with_capacity(capacity) }
    }

    /// Candidatos del paso actual, de sólo lectura.
    #[must_use]
    pub fn current(&self) -> &[Candidate] {
        &self.current
    }

    /// Reemplaza el búfer "siguiente" con un nuevo conjunto de
    /// candidatos (ya podados a lo sumo a `T`) e intercambia los
    /// búferes, avanzando el haz un paso (transición `Advanced`).
    ///
    /// Copia los candidatos podados dentro del búfer "siguiente"
    /// preasignado en lugar de adoptar el `Vec` entrante, para que
    /// ambos lados de la arena conserven su capacidad de `2 * t` a lo
    /// largo de toda la búsqueda.
    pub fn advance(&mut self, pruned_children: Vec<Candidate>) {
        self.next.clear();
        self.next.extend(pruned_children);
        std::mem::swap(&mut self.current, &mut self.next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fork_sets_the_new_bit_correctly() {
        let parent = Candidate { state: 0b101, len: 3, score: -1.0 };
        let [zero_child, one_child] = parent.fork();
        assert_eq!(zero_child.state, 0b0101);
        assert_eq!(zero_child.len, 4);
        assert_eq!(one_child.state, 0b1101);
        assert_eq!(one_child.len, 4);
        assert_eq!(zero_child.score, parent.score);
        assert_eq!(one_child.score, parent.score);
    }

    #[test]
    fn candidate_order_breaks_ties_by_state() {
        let a = Candidate { state: 5, len: 4, score: -2.0 };
        let b = Candidate { state: 2, len: 4, score: -2.0 };
        let mut v = vec![a, b];
        v.sort_by(candidate_order);
        assert_eq!(v[0].state, 2);
    }

    #[test]
    fn candidate_order_prefers_higher_score() {
        let a = Candidate { state: 100, len: 4, score: -5.0 };
        let b = Candidate { state: 0, len: 4, score: -1.0 };
        let mut v = vec![a, b];
        v.sort_by(candidate_order);
        assert_eq!(v[0].state, 0);
    }

    #[test]
    fn beam_starts_with_single_root_candidate() {
        let beam = Beam::new(100);
        assert_eq!(beam.current().len(), 1);
        assert_eq!(beam.current()[0].len, 0);
    }

    #[test]
    fn advance_swaps_in_the_new_generation() {
        let mut beam = Beam::new(10);
        let children = beam.current()[0].fork().to_vec();
        beam.advance(children);
        assert_eq!(beam.current().len(), 2);
        assert!(beam.current().iter().all(|c| c.len == 1));
    }
}
