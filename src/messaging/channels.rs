// Lock-free command channel between the UI thread and the audio callback

use crate::messaging::command::Command;
use ringbuf::{HeapRb, traits::Split};

pub type CommandProducer = ringbuf::HeapProd<Command>;
pub type CommandConsumer = ringbuf::HeapCons<Command>;

/// Single-producer single-consumer command channel. The audio callback owns
/// the consumer; pushing never blocks, and a full buffer drops the command
/// (audible as a skipped note under absurd load, never a stall).
pub fn create_command_channel(capacity: usize) -> (CommandProducer, CommandConsumer) {
    let rb = HeapRb::<Command>::new(capacity);
    rb.split()
}
