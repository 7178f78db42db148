#[allow(clippy::too_many_arguments)]
pub mod photo_quest {
    use alloy::sol;

    sol!(
        #[derive(Debug, PartialEq, Eq)]
        #[sol(rpc)]
        contract PhotoQuest {
            struct Quest {
                uint256 id;
                address creator;
                string title;
                string description;
                uint8 category;
                uint256 reward;
                uint256 deadline;
                uint256 maxSubmissions;
                uint8 status;
                uint256 createdAt;
                uint256 completedAt;
                uint256 submissionCount;
            }

            struct Submission {
                address photographer;
                string watermarkedPhotoIPFS;
                string originalPhotoIPFS;
                uint256 submissionIndex;
                uint256 submittedAt;
                bool isSelected;
            }

            event QuestCreated(
                uint256 indexed questId,
                address indexed requester,
                string title,
                uint8 category,
                uint256 reward,
                uint256 deadline,
                uint256 maxSubmissions
            );
            event PhotoSubmitted(
                uint256 indexed questId,
                address indexed photographer,
                string watermarkedPhotoIPFS,
                uint256 submissionIndex,
                uint256 timestamp
            );
            event SubmissionsSelected(
                uint256 indexed questId,
                address indexed requester,
                address[] selectedPhotographers,
                uint256 rewardPerWinner,
                uint256 timestamp
            );
            event QuestCompleted(
                uint256 indexed questId,
                address indexed requester,
                uint256 totalSelectedSubmissions,
                uint256 totalRewardDistributed,
                uint256 platformFee
            );
            event QuestCancelled(
                uint256 indexed questId,
                address indexed requester,
                uint256 refundAmount
            );
            event PlatformFeeUpdated(uint256 oldFee, uint256 newFee);

            function questCounter() external view returns (uint256);
            function getQuest(uint256 questId) external view returns (Quest memory);
            function getQuestSubmissions(uint256 questId) external view returns (Submission[] memory);
            function hasPhotographerSubmitted(uint256 questId, address photographer) external view returns (bool);
            function getPhotographerSubmission(uint256 questId, address photographer) external view returns (Submission memory);
            function getUserQuests(address user) external view returns (uint256[] memory);
            function getPhotographerQuests(address photographer) external view returns (uint256[] memory);
            function getSelectedSubmissions(uint256 questId) external view returns (Submission[] memory);

            function createQuest(
                string title,
                string description,
                uint8 category,
                uint256 deadline,
                uint256 maxSubmissions
            ) external payable returns (uint256);
            function submitPhoto(uint256 questId, string watermarkedPhotoIPFS, string originalPhotoIPFS) external;
            function selectSubmissions(uint256 questId, uint256[] submissionIndices) external;
        }
    );
}

pub use photo_quest::PhotoQuest;
