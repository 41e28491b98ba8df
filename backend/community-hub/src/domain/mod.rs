pub mod models;

pub use models::{
    Community, Follower, FollowerResponse, GithubUser, IdParam, NewCommunity, NewPost,
    Pagination, Post,
};
