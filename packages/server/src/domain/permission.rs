//! Channel ownership and permission rules.
//!
//! This module contains pure functions that implement the channel
//! permission gate without side effects, making them easy to test.
//!
//! Ownership today is tracked by the caller (the channel record's creator
//! field is not yet part of this layer's storage), so these functions take
//! the resolved facts as arguments and stay enforcement-point agnostic.

/// Name of the distinguished default channel. It can never be renamed or
/// deleted, by anyone.
pub const DEFAULT_CHANNEL_NAME: &str = "general";

/// Role of a workspace member, as resolved by the identity provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Member,
    Viewer,
}

/// Check whether the actor may rename the channel.
///
/// Rules, evaluated in order:
/// 1. The default channel can never be renamed.
/// 2. A viewer can never rename any channel.
/// 3. Otherwise, renaming requires being the recorded creator.
pub fn can_rename_channel(channel_name: &str, role: Role, is_creator: bool) -> bool {
    if channel_name == DEFAULT_CHANNEL_NAME {
        return false;
    }
    match role {
        Role::Viewer => false,
        Role::Admin | Role::Member => is_creator,
    }
}

/// Check whether the actor may delete the channel.
///
/// Rules, evaluated in order:
/// 1. The default channel can never be deleted.
/// 2. A viewer can never delete any channel.
/// 3. Otherwise, deleting is granted to the creator or to any admin.
pub fn can_delete_channel(channel_name: &str, role: Role, is_creator: bool) -> bool {
    if channel_name == DEFAULT_CHANNEL_NAME {
        return false;
    }
    match role {
        Role::Viewer => false,
        Role::Admin => true,
        Role::Member => is_creator,
    }
}
