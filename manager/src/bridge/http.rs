use crate::bridge::readings::{LiveReadings, ReadingUpdate};
use crate::service::store::ConfigStore;
use fusioncore::prelude::{GlobalPatch, LayoutPatch, TickResult, Zone, ZoneKind};
use log::info;
use serde::Deserialize;
use serde_json::json;
use std::{
    net::SocketAddr,
    sync::{Arc, Mutex, RwLock},
    thread,
};
use tokio::runtime::Builder;
use warp::{http::StatusCode, Filter};

#[derive(Debug, Clone, Deserialize)]
pub struct AddRadarRequest {
    pub radar_name: String,
    #[serde(default = "default_map_group")]
    pub map_group: String,
}

fn default_map_group() -> String {
    fusioncore::model::DEFAULT_MAP_GROUP.to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoveRadarRequest {
    pub radar_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ZoneUpdateRequest {
    pub radar_name: Option<String>,
    pub zone_type: ZoneKind,
    #[serde(default)]
    pub zones: Vec<Zone>,
    pub map_group: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LayoutUpdateRequest {
    pub radar_name: String,
    pub layout: LayoutPatch,
    pub map_group: Option<String>,
}

type SharedStore = Arc<Mutex<ConfigStore>>;
type SharedState = Arc<RwLock<TickResult>>;

fn reply_outcome(result: anyhow::Result<()>) -> impl warp::Reply {
    match result {
        Ok(()) => warp::reply::with_status(
            warp::reply::json(&json!({"status": "ok"})),
            StatusCode::OK,
        ),
        Err(err) => warp::reply::with_status(
            warp::reply::json(&json!({"status": "error", "message": err.to_string()})),
            StatusCode::BAD_REQUEST,
        ),
    }
}

/// HTTP bridge exposing tick state, live-reading ingest, and the
/// configuration mutation entry points. Every mutation persists the store
/// before replying.
pub struct HttpBridge;

impl HttpBridge {
    pub fn new(
        addr: SocketAddr,
        state: SharedState,
        store: SharedStore,
        readings: LiveReadings,
    ) -> Self {
        let state_filter = warp::any().map(move || state.clone());
        let store_filter = warp::any().map(move || store.clone());
        let readings_filter = warp::any().map(move || readings.clone());

        let get_state = warp::path("state")
            .and(warp::get())
            .and(state_filter)
            .map(|state: SharedState| warp::reply::json(&*state.read().unwrap()));

        let get_config = warp::path("config")
            .and(warp::get())
            .and(warp::path::end())
            .and(store_filter.clone())
            .map(|store: SharedStore| warp::reply::json(&store.lock().unwrap().data));

        let post_readings = warp::path("readings")
            .and(warp::post())
            .and(warp::body::json())
            .and(readings_filter)
            .map(|update: ReadingUpdate, readings: LiveReadings| {
                readings.apply(update);
                reply_outcome(Ok(()))
            });

        let add_radar = warp::path!("radar" / "add")
            .and(warp::post())
            .and(warp::body::json())
            .and(store_filter.clone())
            .map(|req: AddRadarRequest, store: SharedStore| {
                reply_outcome(
                    store
                        .lock()
                        .unwrap()
                        .add_radar(&req.radar_name, &req.map_group),
                )
            });

        let remove_radar = warp::path!("radar" / "remove")
            .and(warp::post())
            .and(warp::body::json())
            .and(store_filter.clone())
            .map(|req: RemoveRadarRequest, store: SharedStore| {
                reply_outcome(store.lock().unwrap().remove_radar(&req.radar_name))
            });

        let update_zone = warp::path!("zone" / "update")
            .and(warp::post())
            .and(warp::body::json())
            .and(store_filter.clone())
            .map(|req: ZoneUpdateRequest, store: SharedStore| {
                reply_outcome(store.lock().unwrap().update_zones(
                    req.radar_name.as_deref(),
                    req.zone_type,
                    req.zones,
                    req.map_group.as_deref(),
                ))
            });

        let update_layout = warp::path!("layout" / "update")
            .and(warp::post())
            .and(warp::body::json())
            .and(store_filter.clone())
            .map(|req: LayoutUpdateRequest, store: SharedStore| {
                reply_outcome(store.lock().unwrap().update_layout(
                    &req.radar_name,
                    &req.layout,
                    req.map_group.as_deref(),
                ))
            });

        let update_global = warp::path!("config" / "global")
            .and(warp::post())
            .and(warp::body::json())
            .and(store_filter.clone())
            .map(|patch: GlobalPatch, store: SharedStore| {
                reply_outcome(store.lock().unwrap().update_global(&patch))
            });

        let import_config = warp::path!("config" / "import")
            .and(warp::post())
            .and(warp::body::json())
            .and(store_filter)
            .map(|blob: serde_json::Value, store: SharedStore| {
                reply_outcome(store.lock().unwrap().import(&blob.to_string()))
            });

        thread::spawn(move || {
            let routes = get_state
                .or(get_config)
                .or(post_readings)
                .or(add_radar)
                .or(remove_radar)
                .or(update_zone)
                .or(update_layout)
                .or(update_global)
                .or(import_config);
            let runtime = Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("failed to build bridge runtime");
            runtime.block_on(async move {
                warp::serve(routes).run(addr).await;
            });
        });

        Self
    }

    pub fn publish_status(&self, message: &str) {
        info!("bridge: {}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_update_request_parses_mixed_point_shapes() {
        let req: ZoneUpdateRequest = serde_json::from_str(
            r#"{
                "zone_type": "include",
                "zones": [{"name": "desk", "points": [[0,0], {"x": 4, "y": 0}, [4,4]], "delay": 2.0}],
                "map_group": "default"
            }"#,
        )
        .unwrap();
        assert_eq!(req.zone_type, ZoneKind::Include);
        assert_eq!(req.zones[0].points.len(), 3);
        assert!(req.radar_name.is_none());
    }

    #[test]
    fn add_radar_request_defaults_the_map_group() {
        let req: AddRadarRequest = serde_json::from_str(r#"{"radar_name": "hall"}"#).unwrap();
        assert_eq!(req.map_group, "default");
    }

    #[test]
    fn layout_request_accepts_partial_layouts() {
        let req: LayoutUpdateRequest = serde_json::from_str(
            r#"{"radar_name": "hall", "layout": {"rotation": 180.0, "mirror_x": true}}"#,
        )
        .unwrap();
        assert_eq!(req.layout.rotation, Some(180.0));
        assert_eq!(req.layout.origin_x, None);
    }
}
