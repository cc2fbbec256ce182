pub mod rebound_vis;
