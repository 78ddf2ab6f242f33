use wasm_bindgen::prelude::*;
use leap_engine::*;

mod game;
mod layout;

use game::DoorStage;

leap_web::export_game!(DoorStage, "door-stage");
