// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

diesel::table! {
    events (event_id) {
        event_id -> Text,
        version -> BigInt,
        organizer_id -> Text,
        title -> Text,
        mode -> Text,
        slots_available -> Integer,
        registrations_count -> Integer,
        waitlist_count -> Integer,
        starts_at -> Text,
        created_at -> Text,
    }
}

diesel::table! {
    registrations (registration_id) {
        registration_id -> Text,
        version -> BigInt,
        event_id -> Text,
        player_id -> Text,
        player2_id -> Nullable<Text>,
        status -> Text,
        partner_status -> Text,
        team_id -> Nullable<Text>,
        looking_for_partner -> Bool,
        waitlist_position -> Nullable<Integer>,
        created_at -> Text,
    }
}

diesel::table! {
    teams (team_id) {
        team_id -> Text,
        version -> BigInt,
        event_id -> Text,
        player1_id -> Text,
        player2_id -> Text,
        player1_confirmed -> Bool,
        player2_confirmed -> Bool,
        status -> Text,
        registration_id -> Nullable<Text>,
        created_at -> Text,
    }
}

diesel::table! {
    notifications (notification_id) {
        notification_id -> Text,
        version -> BigInt,
        user_id -> Text,
        kind -> Text,
        title -> Text,
        message -> Text,
        event_id -> Text,
        team_id -> Nullable<Text>,
        is_read -> Bool,
        created_at -> Text,
    }
}

diesel::allow_tables_to_appear_in_same_query!(events, registrations, teams, notifications);
