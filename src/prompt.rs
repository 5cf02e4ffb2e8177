use serde::Serialize;

/// Authoring rules appended to every system message.
///
/// The model must produce a prompt for ChatGPT, never the final content.
pub const AUTHORING_RULES: &str = "重要なルール:
1. 生成するのは「ChatGPTへのプロンプト」であり、最終的なコンテンツではありません
2. プロンプトは日本語で、具体的かつ明確に記述してください
3. AIが高品質な出力を生成できるよう、詳細な指示を含めてください
4. 出力形式や制約条件も明記してください";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// One entry of a chat-completion `messages` array
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// System/user message pair sent to the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedMessages {
    pub system: String,
    pub user: String,
}

impl ComposedMessages {
    pub fn as_chat_messages(&self) -> [ChatMessage; 2] {
        [
            ChatMessage {
                role: Role::System,
                content: self.system.clone(),
            },
            ChatMessage {
                role: Role::User,
                content: self.user.clone(),
            },
        ]
    }
}

/// Build the message pair from resolved template and tone texts.
///
/// The intent is embedded verbatim.
pub fn compose(template_text: &str, tone_text: &str, intent: &str) -> ComposedMessages {
    let system = format!("{template_text}\n\nトーンの指定: {tone_text}\n\n{AUTHORING_RULES}");

    let user = format!(
        "以下の目的のためのChatGPTプロンプトを生成してください：

目的: {intent}

生成するプロンプトには以下を含めてください：
- 具体的なタスクの説明
- 期待する出力形式
- トーンや文体の指定
- 必要に応じた制約条件"
    );

    ComposedMessages { system, user }
}
