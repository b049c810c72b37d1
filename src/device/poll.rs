// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! One full poll of the receiver over an open connection.

use chrono::Utc;

use crate::command::{MuteCommand, NowPlayingCommand, PowerCommand, SourceCommand, VolumeCommand};
use crate::error::ProtocolError;
use crate::protocol::Connection;
use crate::response::{MuteResponse, NowPlaying, PowerResponse, SourceResponse, VolumeResponse};
use crate::state::DeviceState;
use crate::types::SourceTable;

/// Queries power, volume, mute and input, then now-playing text if the
/// input supports it.
///
/// Queries run strictly in that order on the one connection; the receiver
/// answers in request order. A missing volume line keeps the volume from
/// `previous`. The connection is left open for the caller to close.
pub(crate) async fn run<C: Connection>(
    conn: &mut C,
    previous: &DeviceState,
    sources: &SourceTable,
) -> Result<DeviceState, ProtocolError> {
    let power = PowerResponse::from_reply(&conn.query(&PowerCommand::Query).await?);

    let volume = VolumeResponse::from_reply(&conn.query(&VolumeCommand::Query).await?)
        .volume()
        .unwrap_or_else(|| {
            tracing::debug!("No volume line in reply, keeping previous volume");
            previous.volume()
        });

    let mute = MuteResponse::from_reply(&conn.query(&MuteCommand::Query).await?);

    let source = SourceResponse::from_reply(&conn.query(&SourceCommand::Query).await?);

    let media_text = if sources.is_media_mode_code(source.code()) {
        NowPlaying::from_reply(&conn.query(&NowPlayingCommand).await?).text()
    } else {
        sources
            .lookup_name_by_code(source.code())
            .unwrap_or_default()
            .to_string()
    };

    let state = DeviceState::polled(
        power.into_token(),
        volume,
        mute.is_muted(),
        source.into_code(),
        media_text,
        Utc::now(),
    );
    tracing::debug!(
        power = %state.power_token(),
        volume = %state.volume(),
        muted = state.is_muted(),
        source = %state.source_code(),
        "Polled receiver state"
    );
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::Transport;
    use crate::protocol::scripted::ScriptedTransport;
    use crate::types::Volume;

    async fn poll(transport: &ScriptedTransport, previous: &DeviceState) -> DeviceState {
        let mut conn = transport.open().await.unwrap();
        run(&mut conn, previous, &SourceTable::default())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn queries_in_order_without_media_mode() {
        let transport = ScriptedTransport::new();
        transport
            .reply("PW?", &["PWON"])
            .reply("MV?", &["MV42", "MVMAX 80"])
            .reply("MU?", &["MUOFF"])
            .reply("SI?", &["SICD"]);

        let state = poll(&transport, &DeviceState::new()).await;

        assert_eq!(transport.written(), vec!["PW?", "MV?", "MU?", "SI?"]);
        assert_eq!(state.power_token(), "PWON");
        assert_eq!(state.volume().raw(), 42);
        assert!(!state.is_muted());
        assert_eq!(state.source_code(), "CD");
        assert_eq!(state.media_text(), "CD");
    }

    #[tokio::test]
    async fn media_mode_fetches_now_playing() {
        let transport = ScriptedTransport::new();
        transport
            .reply("PW?", &["PWON"])
            .reply("MV?", &["MV30"])
            .reply("MU?", &["MUON"])
            .reply("SI?", &["SITUNER"])
            .reply("NSE", &["NSE0Now Playing", "NSE1XFM 98.5"]);

        let state = poll(&transport, &DeviceState::new()).await;

        assert_eq!(transport.written(), vec!["PW?", "MV?", "MU?", "SI?", "NSE"]);
        assert!(state.is_muted());
        assert_eq!(state.media_text(), "Now Playing\nFM 98.5\n");
    }

    #[tokio::test]
    async fn silent_receiver_keeps_previous_volume() {
        let transport = ScriptedTransport::new();
        let previous = DeviceState::polled(
            "PWON".to_string(),
            Volume::new(55).unwrap(),
            true,
            "DVD".to_string(),
            "DVD".to_string(),
            Utc::now(),
        );

        let state = poll(&transport, &previous).await;

        assert_eq!(state.volume().raw(), 55);
        assert_eq!(state.power_token(), "");
        assert!(!state.is_muted());
        assert_eq!(state.source_code(), "");
        assert_eq!(state.media_text(), "");
    }

    #[tokio::test]
    async fn unmapped_source_has_empty_media_text() {
        let transport = ScriptedTransport::new();
        transport.reply("SI?", &["SINET/USB"]);

        let state = poll(&transport, &DeviceState::new()).await;

        assert_eq!(state.source_code(), "NET/USB");
        assert_eq!(state.media_text(), "");
    }

    #[tokio::test]
    async fn oversized_volume_reply_keeps_later_fields_aligned() {
        let mut volume = vec!["MV40".to_string()];
        volume.extend((0..70).map(|i| format!("MVX{i:02}")));
        let volume: Vec<&str> = volume.iter().map(String::as_str).collect();
        let transport = ScriptedTransport::new();
        transport
            .reply("PW?", &["PWON"])
            .reply("MV?", &volume)
            .reply("MU?", &["MUON"])
            .reply("SI?", &["SIDVD"]);

        let state = poll(&transport, &DeviceState::new()).await;

        assert_eq!(state.volume().raw(), 40);
        assert!(state.is_muted());
        assert_eq!(state.source_code(), "DVD");
        assert_eq!(state.media_text(), "DVD");
    }

    #[tokio::test]
    async fn write_failure_aborts() {
        let transport = ScriptedTransport::new();
        transport.reply("PW?", &["PWON"]);
        transport.fail_on("MU?");

        let mut conn = transport.open().await.unwrap();
        let result = run(&mut conn, &DeviceState::new(), &SourceTable::default()).await;

        assert!(matches!(result, Err(ProtocolError::Io(_))));
        assert_eq!(transport.written(), vec!["PW?", "MV?"]);
    }
}
