// [libs/core/hitag2-cipher/src/feedback.rs]
/*!
 * APARATO: LINEAR FEEDBACK
 * RESPONSABILIDAD: UN PASO DE RELOJ DEL REGISTRO DE DESPLAZAMIENTO
 *
 * El nuevo bit de entrada es el XOR de los bits de `FEEDBACK_TAPS`
 * sobre el estado ANTES del desplazamiento. El registro se desplaza
 * hacia índices crecientes (el bit más nuevo entra en la posición 0,
 * el más antiguo se descarta al salir por la posición 47), de modo
 * que el clock completo es `(state << 1) | feedback_bit`, recortado a
 * 48 bits.
 */

use crate::constants::FEEDBACK_TAPS;
use crate::filter::f;
use crate::state::{bit_at, clamp};

/// Calcula el bit de retroalimentación del estado actual (sin desplazar).
#[inline]
#[must_use]
pub fn feedback_bit(state: u64) -> bool {
    FEEDBACK_TAPS.iter().fold(false, |acc, &tap| acc ^ bit_at(state, tap))
}

/// Ejecuta un pulso de reloj: desplaza el registro y reevalúa el filtro
/// sobre el estado resultante.
///
/// Devuelve `(nuevo_estado, bit_de_keystream)`: el registro se desplaza
/// primero y `f` se reevalúa sobre el estado ya desplazado.
#[must_use]
pub fn step(state: u64) -> (u64, bool) {
    let new_bit = feedback_bit(state) as u64;
    let new_state = clamp((state << 1) | new_bit);
    let output = f(new_state);
    (new_state, output)
}
