mod exclusion;
mod gating;
mod menu;
mod snooze;
mod termination;
