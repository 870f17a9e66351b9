//! Delta-delta state for the ticksync protocol.
//!
//! A server keeps a [`World`] and one [`Publisher`] per peer. The publisher
//! turns the world into an [`wire::InitialCheckout`] once and into
//! [`wire::Tick`] messages afterwards; the peer's [`Replica`] inverts them.
//!
//! # Design Principles
//!
//! - **Bit-exact** - Reconstruction uses wrapping `i64` arithmetic, so every
//!   value survives any number of ticks.
//! - **Mirrored state** - Publisher and replica seed new and removed slots
//!   with zero in the same order, so they never drift apart.
//! - **All or nothing** - A rejected message leaves the replica unchanged.

mod error;
pub mod integrate;
mod publisher;
mod replica;
mod track;
mod world;

pub use error::{CodecError, CodecResult};
pub use publisher::Publisher;
pub use replica::Replica;
pub use track::ComponentTrack;
pub use world::{StateSlots, World};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_api_exports() {
        let _ = Publisher::new();
        let _ = Replica::new();
        let _ = World::new(0);
        let _ = ComponentTrack::zeroed(0);
        let _: CodecResult<()> = Ok(());
    }

    #[test]
    fn publisher_and_replica_agree_in_memory() {
        let pos = wire::ComponentId::new(1);
        let mut world = World::new(1);
        world.set_component(pos, &[100]).unwrap();
        let mut publisher = Publisher::new();
        let mut replica = Replica::new();
        replica
            .apply_initial_checkout(&publisher.initial_checkout(0, &world))
            .unwrap();
        for step in 1..5 {
            world.set_component(pos, &[100 + step * step]).unwrap();
            let tick = publisher.tick(step as u64, &[], &world).unwrap();
            replica.apply_tick(&tick).unwrap();
            assert_eq!(replica.value(pos, 0), Some(100 + step * step));
        }
    }
}
