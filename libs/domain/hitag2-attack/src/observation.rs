// [libs/domain/hitag2-attack/src/observation.rs]
/*!
 * APARATO: OBSERVATION SET
 * RESPONSABILIDAD: CONJUNTO INMUTABLE DE PARES (IV, KEYSTREAM) EN RAM
 *
 * Parsear el formato de texto `<IV_HEX> <AUTH_HEX>` es trabajo de un
 * colaborador externo; este tipo sólo acepta pares ya analizados.
 * Inmutable tras la carga: ninguna escritura ocurre después de
 * `ObservationSet::new`.
 */

use hitag2_cipher::Iv;

use crate::error::AttackError;

/// Un único par (IV, prefijo de keystream observado).
#[derive(Debug, Clone)]
pub struct Observation {
    /// El nonce de 32 bits bajo el cual se produjo este flujo.
    pub iv: Iv,
    /// El prefijo de keystream observado, un `bool` por bit.
    pub keystream: Vec<bool>,
}

impl Observation {
    /// Construye una observación a partir de un IV y su prefijo de flujo.
    #[must_use]
    pub fn new(iv: Iv, keystream: Vec<bool>) -> Self {
        Self { iv, keystream }
    }
}

/// Conjunto de observaciones inmutable, indexable, de tamaño fijo `N`.
#[derive(Debug, Clone)]
pub struct ObservationSet {
    observations: Vec<Observation>,
    /// Ventana efectiva: el mínimo de `W` configurado y la longitud más
    /// corta de cualquier observación individual.
    window: usize,
}

impl ObservationSet {
    /// Construye el conjunto, derivando la ventana efectiva `w`.
    ///
    /// Rechaza un conjunto vacío de inmediato: se requiere al menos una
    /// observación para que la búsqueda tenga sentido.
    pub fn new(observations: Vec<Observation>, configured_window: usize) -> Result<Self, AttackError> {
        if observations.is_empty() {
            return Err(AttackError::NoObservations);
        }
        let shortest = observations
            .iter()
            .map(|o| o.keystream.len())
            .min()
            .unwrap_or(0);
        let window = configured_window.min(shortest);
        Ok(Self { observations, window })
    }

    /// Número de observaciones `N`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// `true` si el conjunto no contiene observaciones (siempre falso
    /// después de una construcción exitosa; expuesto por simetría con
    /// `len`).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Ventana efectiva `w` usada por el anotador de correlación.
    #[must_use]
    pub fn window(&self) -> usize {
        self.window
    }

    /// Acceso por índice de sólo lectura.
    #[must_use]
    pub fn get(&self, index: usize) -> &Observation {
        &self.observations[index]
    }

    /// Iterador de sólo lectura sobre todas las observaciones.
    pub fn iter(&self) -> impl Iterator<Item = &Observation> {
        self.observations.iter()
    }
}
