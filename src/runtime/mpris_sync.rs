use crate::controller::Snapshot;
use crate::library::Track;
use crate::mpris::MprisHandle;

pub fn update_mpris(mpris: &MprisHandle, snapshot: &Snapshot, tracks: &[Track]) {
    let track = snapshot.current_index.and_then(|i| tracks.get(i));
    mpris.set_track(track);
    mpris.set_playback(snapshot.state);
}
