//! Chat command tokens typed by the roller.

/// A recognized chat command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum ChatCommand {
    Close,
    Setup,
    Roll,
    Triangle,
    DisableMessages,
    EnableMessages,
}

impl ChatCommand {
    /// Tokens in the order they are checked. The first token found anywhere
    /// in the message wins.
    const TOKENS: [(&'static str, ChatCommand); 6] = [
        (":close", ChatCommand::Close),
        (":setup", ChatCommand::Setup),
        (":roll", ChatCommand::Roll),
        (":tri", ChatCommand::Triangle),
        (":disablemsg", ChatCommand::DisableMessages),
        (":enablemsg", ChatCommand::EnableMessages),
    ];

    pub fn recognize(text: &str) -> Option<Self> {
        Self::TOKENS
            .iter()
            .find(|(token, _)| text.contains(token))
            .map(|&(_, command)| command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_each_token() {
        assert_eq!(ChatCommand::recognize(":close"), Some(ChatCommand::Close));
        assert_eq!(ChatCommand::recognize(":setup"), Some(ChatCommand::Setup));
        assert_eq!(ChatCommand::recognize(":roll"), Some(ChatCommand::Roll));
        assert_eq!(ChatCommand::recognize(":tri"), Some(ChatCommand::Triangle));
        assert_eq!(
            ChatCommand::recognize(":disablemsg"),
            Some(ChatCommand::DisableMessages)
        );
        assert_eq!(
            ChatCommand::recognize(":enablemsg"),
            Some(ChatCommand::EnableMessages)
        );
    }

    #[test]
    fn tokens_match_anywhere_in_the_message() {
        assert_eq!(
            ChatCommand::recognize("ok :roll please"),
            Some(ChatCommand::Roll)
        );
    }

    #[test]
    fn earlier_tokens_take_priority() {
        assert_eq!(
            ChatCommand::recognize(":tri then :close"),
            Some(ChatCommand::Close)
        );
    }

    #[test]
    fn plain_chat_is_not_a_command() {
        assert_eq!(ChatCommand::recognize("hello there"), None);
        assert_eq!(ChatCommand::recognize("roll"), None);
    }
}
