// [libs/core/hitag2-cipher/src/lib.rs]
#![deny(missing_docs)]

/*!
 * =================================================================
 * APARATO: HITAG2 CIPHER CORE HUB
 * CLASIFICACIÓN: CORE PRIMITIVE (ESTRATO L1)
 * RESPONSABILIDAD: FILTRO NO LINEAL, RETROALIMENTACIÓN LINEAL Y CARGA
 *                   DE ESTADO INICIAL DEL GENERADOR HITAG2
 *
 * Primitivas puras y deterministas. Sin asignación dinámica fuera de
 * `keystream`'s `Vec` de salida, sin I/O, sin estado compartido: cada
 * función es apta para ser llamada desde cualquier hilo del motor de
 * ataque sin sincronización.
 * =================================================================
 */

/// Constantes de cable (taps de retroalimentación, tablas del filtro).
pub mod constants;
/// Generación de flujo y carga de estado inicial.
pub mod cipher;
/// Un pulso de reloj del registro de desplazamiento.
pub mod feedback;
/// Función de filtro no lineal `f`.
pub mod filter;
/// Newtypes de identidad: `Key`, `Uid`, `Iv`.
pub mod key;
/// Utilidades mínimas sobre el registro de 48 bits.
pub mod state;

pub use cipher::{keystream, load};
pub use feedback::step;
pub use filter::{f, linear_approx};
pub use key::{Iv, Key, KeyParseError, Uid};

/// Reexportaciones de uso habitual para los crates de dominio.
pub mod prelude {
    pub use crate::cipher::{keystream, load};
    pub use crate::constants::{FEEDBACK_TAPS, FILTER_POSITIONS, STATE_BITS, STATE_MASK};
    pub use crate::feedback::{feedback_bit, step};
    pub use crate::filter::{f, linear_approx};
    pub use crate::key::{Iv, Key, KeyParseError, Uid};
}
