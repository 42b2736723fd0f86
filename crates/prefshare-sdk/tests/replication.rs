//! End-to-end device simulation: several applications, one shared bus,
//! one master, replicated slave copies.

use std::sync::Arc;

use prefshare_directory::{
    DirectoryConfig, Endpoint, EndpointSource, PeerDirectory, StaticEndpoints,
};
use prefshare_sdk::SharedPrefs;
use prefshare_store::{MemoryHub, PeerStore, ScalarStore};
use prefshare_sync::{LocalBus, PeerChannel, PeerSubscriber, Replicator};
use prefshare_types::{keys, PeerId, ScalarKind, ScalarValue};

const CREDENTIAL: &str = "com.owlr.PERMISSION";

/// A simulated device: one hub of peer stores, one broadcast bus, and a
/// replicator registered per application process.
struct Device {
    hub: Arc<MemoryHub>,
    bus: Arc<LocalBus>,
    endpoints: Arc<StaticEndpoints>,
}

impl Device {
    fn with_apps(ids: &[&str]) -> Self {
        let hub = Arc::new(MemoryHub::new());
        let bus = Arc::new(LocalBus::new());
        for id in ids {
            let store = hub.register(PeerId::new(*id));
            let replicator =
                Replicator::new(PeerId::new(*id), store as Arc<dyn ScalarStore>);
            bus.subscribe(Arc::new(replicator) as Arc<dyn PeerSubscriber>);
        }
        let endpoints = Arc::new(StaticEndpoints::new(
            ids.iter().map(|id| Endpoint::new(*id, CREDENTIAL)).collect(),
        ));
        Self { hub, bus, endpoints }
    }

    /// The facade as seen from the application identified by `id`.
    fn prefs_of(&self, id: &str) -> SharedPrefs {
        let config = DirectoryConfig::new("com\\.owlr\\..*", CREDENTIAL, id).unwrap();
        let directory = PeerDirectory::new(
            config,
            Arc::clone(&self.endpoints) as Arc<dyn EndpointSource>,
        );
        SharedPrefs::new(
            directory,
            Arc::clone(&self.hub) as Arc<dyn PeerStore>,
            Arc::clone(&self.bus) as Arc<dyn PeerChannel>,
        )
        .unwrap()
    }

    fn entry_of(&self, id: &str, key: &str, kind: ScalarKind) -> Option<ScalarValue> {
        self.hub
            .store_of(&PeerId::new(id))
            .unwrap()
            .get(key, kind)
            .unwrap()
    }
}

#[test]
fn all_facades_agree_on_one_master() {
    let device = Device::with_apps(&["com.owlr.camera", "com.owlr.doorbell", "com.owlr.hub"]);
    let a = device.prefs_of("com.owlr.camera");
    let b = device.prefs_of("com.owlr.doorbell");
    let c = device.prefs_of("com.owlr.hub");

    assert_eq!(a.master().as_str(), "com.owlr.camera");
    assert_eq!(b.master(), a.master());
    assert_eq!(c.master(), a.master());
}

#[test]
fn a_commit_replicates_to_every_slave() {
    let device = Device::with_apps(&["com.owlr.camera", "com.owlr.doorbell", "com.owlr.hub"]);
    let writer = device.prefs_of("com.owlr.doorbell");

    writer
        .edit()
        .unwrap()
        .put_i32("volume", 5)
        .put_string("ringtone", "chime")
        .commit()
        .unwrap();

    // The master holds the data via the addressed write...
    assert_eq!(
        device.entry_of("com.owlr.camera", "volume", ScalarKind::Integer),
        Some(ScalarValue::I32(5))
    );
    // ...and both slaves received the broadcast and applied it.
    for slave in ["com.owlr.doorbell", "com.owlr.hub"] {
        assert_eq!(
            device.entry_of(slave, "volume", ScalarKind::Integer),
            Some(ScalarValue::I32(5)),
            "slave {slave} did not apply the change"
        );
        assert_eq!(
            device.entry_of(slave, "ringtone", ScalarKind::String),
            Some(ScalarValue::Str("chime".to_string()))
        );
    }
}

#[test]
fn the_master_flag_never_replicates() {
    let device = Device::with_apps(&["com.owlr.camera", "com.owlr.doorbell"]);
    let writer = device.prefs_of("com.owlr.camera");

    writer.edit().unwrap().put_bool("armed", true).commit().unwrap();

    // Election flagged the master in its own store only; replication must
    // not copy the flag into slaves.
    assert_eq!(
        device.entry_of("com.owlr.camera", keys::MASTER_KEY, ScalarKind::Boolean),
        Some(ScalarValue::Bool(true))
    );
    assert_eq!(
        device.entry_of("com.owlr.doorbell", keys::MASTER_KEY, ScalarKind::Boolean),
        None
    );
}

#[test]
fn reads_route_to_the_master_copy() {
    let device = Device::with_apps(&["com.owlr.camera", "com.owlr.doorbell"]);
    let writer = device.prefs_of("com.owlr.camera");
    let reader = device.prefs_of("com.owlr.doorbell");

    writer.edit().unwrap().put_i64("last_seen", 42).commit().unwrap();

    assert_eq!(reader.get_i64("last_seen", 0), 42);
    // Typed addressing holds across facades too.
    assert_eq!(reader.get_string("last_seen", "none"), "none");
}

#[test]
fn surviving_peer_takes_over_with_replicated_data() {
    let device = Device::with_apps(&["com.owlr.camera", "com.owlr.doorbell"]);
    let writer = device.prefs_of("com.owlr.camera");
    writer.edit().unwrap().put_i32("volume", 9).commit().unwrap();

    // The master app is uninstalled.
    device.hub.unregister(&PeerId::new("com.owlr.camera"));
    device.endpoints.set(vec![Endpoint::new("com.owlr.doorbell", CREDENTIAL)]);

    // The survivor re-elects itself and still has the data: that is the
    // point of replicating every commit to the slaves.
    let survivor = device.prefs_of("com.owlr.doorbell");
    assert_eq!(survivor.refresh_master().unwrap().as_str(), "com.owlr.doorbell");
    assert_eq!(survivor.get_i32("volume", 0), 9);
}

#[test]
fn removals_replicate() {
    let device = Device::with_apps(&["com.owlr.camera", "com.owlr.doorbell"]);
    let writer = device.prefs_of("com.owlr.camera");

    writer.edit().unwrap().put_i32("volume", 5).commit().unwrap();
    writer.edit().unwrap().remove("volume").commit().unwrap();

    assert_eq!(
        device.entry_of("com.owlr.doorbell", "volume", ScalarKind::Integer),
        None
    );
}

#[test]
fn writer_with_stale_master_converges() {
    let device = Device::with_apps(&["com.owlr.camera", "com.owlr.doorbell"]);
    let a = device.prefs_of("com.owlr.camera");
    let b = device.prefs_of("com.owlr.doorbell");

    // Simulate a promotion race: both peers got flagged somehow.
    device
        .hub
        .store_of(&PeerId::new("com.owlr.doorbell"))
        .unwrap()
        .apply(&prefshare_types::ChangeSet::single(keys::MASTER_KEY, true))
        .unwrap();

    // The next write session resolves the duplicate: first in order wins,
    // the other is demoted.
    a.edit().unwrap().put_bool("ok", true).commit().unwrap();
    assert_eq!(
        device.entry_of("com.owlr.doorbell", keys::MASTER_KEY, ScalarKind::Boolean),
        Some(ScalarValue::Bool(false))
    );
    assert_eq!(b.refresh_master().unwrap().as_str(), "com.owlr.camera");
}
