//! Test data helpers for creating test objects
//!
//! This module provides helper functions for creating test Telegram
//! updates, messages, callback queries and chat membership events.

#![allow(dead_code)]

use chrono::Utc;
use teloxide::types::{
    Banned, CallbackQuery, Chat, ChatId, ChatKind, ChatMember, ChatMemberKind, ChatMemberUpdated,
    ChatPrivate, ChatPublic, MaybeInaccessibleMessage, MediaKind, MediaText, Message,
    MessageCommon, MessageId, MessageKind, PublicChatKind, PublicChatSupergroup, UntilDate,
    Update, UpdateId, UpdateKind, User, UserId,
};

/// Helper function to create a test Telegram user
pub fn create_test_user(
    user_id: i64,
    username: Option<&str>,
    language_code: Option<&str>,
    is_premium: bool,
) -> User {
    User {
        id: UserId(user_id as u64),
        is_bot: false,
        first_name: "Test".to_string(),
        last_name: None,
        username: username.map(|s| s.to_string()),
        language_code: language_code.map(|s| s.to_string()),
        is_premium,
        added_to_attachment_menu: false,
    }
}

/// Helper function to create a test private chat
pub fn create_test_private_chat(chat_id: i64) -> Chat {
    Chat {
        id: ChatId(chat_id),
        kind: ChatKind::Private(ChatPrivate {
            username: Some("testuser".to_string()),
            first_name: Some("Test".to_string()),
            last_name: None,
        }),
    }
}

/// Helper function to create a test group chat
pub fn create_test_group_chat(chat_id: i64, title: &str) -> Chat {
    Chat {
        id: ChatId(chat_id),
        kind: ChatKind::Public(ChatPublic {
            title: Some(title.to_string()),
            kind: PublicChatKind::Supergroup(PublicChatSupergroup {
                username: None,
                is_forum: false,
            }),
        }),
    }
}

/// Helper function to create a test Telegram message
pub fn create_test_message(from: Option<User>, chat: Chat, text: &str) -> Message {
    Message {
        id: MessageId(1),
        thread_id: None,
        from,
        sender_chat: None,
        sender_business_bot: None,
        date: Utc::now(),
        chat,
        is_topic_message: false,
        via_bot: None,
        kind: MessageKind::Common(MessageCommon {
            author_signature: None,
            forward_origin: None,
            external_reply: None,
            quote: None,
            reply_to_story: None,
            edit_date: None,
            media_kind: MediaKind::Text(MediaText {
                text: text.to_string(),
                entities: vec![],
                link_preview_options: None,
            }),
            reply_markup: None,
            effect_id: None,
            reply_to_message: None,
            sender_boost_count: None,
            is_automatic_forward: false,
            has_protected_content: false,
            is_from_offline: false,
            business_connection_id: None,
        }),
    }
}

/// Helper function to create a test callback query
pub fn create_test_callback_query(user: User, chat: Chat, data: &str) -> CallbackQuery {
    let message = create_test_message(Some(user.clone()), chat, "menu");

    CallbackQuery {
        id: format!("callback_{}", user.id.0),
        from: user,
        message: Some(MaybeInaccessibleMessage::Regular(Box::new(message))),
        inline_message_id: None,
        data: Some(data.to_string()),
        game_short_name: None,
        chat_instance: "test_chat_instance".to_string(),
    }
}

/// Helper function to create a chat membership update
pub fn create_member_update(
    chat: Chat,
    from: User,
    old_kind: ChatMemberKind,
    new_kind: ChatMemberKind,
) -> ChatMemberUpdated {
    ChatMemberUpdated {
        chat,
        from: from.clone(),
        date: Utc::now(),
        old_chat_member: ChatMember {
            user: from.clone(),
            kind: old_kind,
        },
        new_chat_member: ChatMember {
            user: from,
            kind: new_kind,
        },
        invite_link: None,
        via_join_request: false,
        via_chat_folder_invite_link: false,
    }
}

/// Membership kind for a user who blocked or removed the bot ("kicked")
pub fn banned_member_kind() -> ChatMemberKind {
    ChatMemberKind::Banned(Banned {
        until_date: UntilDate::Forever,
    })
}

/// Wrap an update kind into a full update
pub fn update_of(kind: UpdateKind) -> Update {
    Update {
        id: UpdateId(1),
        kind,
    }
}

/// Message update originating from the given user in a private chat
pub fn message_update(user_id: i64, username: Option<&str>, language_code: Option<&str>) -> Update {
    let user = create_test_user(user_id, username, language_code, false);
    let chat = create_test_private_chat(user_id);
    update_of(UpdateKind::Message(create_test_message(Some(user), chat, "hello")))
}

/// Callback query update originating from the given user
pub fn callback_update(user_id: i64, data: &str) -> Update {
    let user = create_test_user(user_id, Some("testuser"), Some("ru"), false);
    let chat = create_test_private_chat(user_id);
    update_of(UpdateKind::CallbackQuery(create_test_callback_query(user, chat, data)))
}

/// Private-chat membership update with the given new membership kind
pub fn private_member_update(user_id: i64, new_kind: ChatMemberKind) -> Update {
    let user = create_test_user(user_id, Some("testuser"), Some("ru"), false);
    let chat = create_test_private_chat(user_id);
    update_of(UpdateKind::MyChatMember(create_member_update(
        chat,
        user,
        ChatMemberKind::Left,
        new_kind,
    )))
}
